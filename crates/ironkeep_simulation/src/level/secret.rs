//! Secret wall trigger
//!
//! Каждый тик (пока control активен): луч из центра экрана по ВСЕМ стенам.
//! Ближайший hit = secret и дистанция <= interact_distance → y -= step (за тик, не за секунду).
//! Нижняя граница base_y + floor_offset; вверх стена не возвращается.

use bevy::prelude::*;

use crate::combat::nearest_hit;
use crate::components::{Hitbox, SecretWall, Wall};
use crate::config::SimulationConfig;
use crate::input::CameraPose;
use crate::logger;

/// Новая высота secret wall после одного шага (никогда не выше текущей)
pub fn lowered_height(current_y: f32, base_y: f32, step: f32, floor_offset: f32) -> f32 {
    let floor = base_y + floor_offset;
    (current_y - step.max(0.0)).max(floor).min(current_y)
}

/// Система: опускание secret wall, пока на неё смотрят вблизи
pub fn secret_wall_trigger(
    camera: Res<CameraPose>,
    config: Res<SimulationConfig>,
    mut walls: Query<(Entity, &mut Transform, &Hitbox, Option<&mut SecretWall>), With<Wall>>,
) {
    let hit = nearest_hit(
        camera.position,
        camera.view_direction(),
        walls
            .iter()
            .map(|(entity, transform, hitbox, _)| (entity, transform, hitbox)),
    );

    let Some(hit) = hit.filter(|hit| hit.distance <= config.secret.interact_distance) else {
        return;
    };
    let Ok((entity, mut transform, _, Some(mut secret))) = walls.get_mut(hit.entity) else {
        return;
    };

    let current = transform.translation.y;
    let lowered = lowered_height(
        current,
        secret.base_y,
        config.secret.step_per_tick,
        config.secret.floor_offset,
    );
    if lowered >= current {
        return;
    }

    transform.translation.y = lowered;
    if !secret.opening {
        secret.opening = true;
        logger::log_info(&format!("🚪 Secret wall {:?} is opening", entity));
    }
    if lowered <= secret.base_y + config.secret.floor_offset {
        logger::log_info(&format!("🚪 Secret wall {:?} fully open", entity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowered_height_clamps_at_floor() {
        assert_eq!(lowered_height(2.0, 2.0, 0.5, -5.0), 1.5);
        assert_eq!(lowered_height(-2.75, 2.0, 0.5, -5.0), -3.0);
        assert_eq!(lowered_height(-3.0, 2.0, 0.5, -5.0), -3.0);
    }

    #[test]
    fn test_lowered_height_never_rises() {
        // Отрицательный шаг не поднимает стену
        assert_eq!(lowered_height(1.0, 2.0, -0.5, -5.0), 1.0);
        // Ниже пола (например, после смены config) — остаётся на месте
        assert_eq!(lowered_height(-4.0, 2.0, 0.1, -5.0), -4.0);
    }
}

//! Player kinematics: WASD относительно камеры, sprint, прыжок, гравитация, пол.
//!
//! Коллизий со стенами нет — только пол на высоте глаз.

use bevy::prelude::*;

use crate::components::{Kinematics, Player};
use crate::config::{MovementConfig, SimulationConfig};
use crate::frame::FrameClock;
use crate::input::{CameraPose, InputSnapshot};

/// Горизонтальное направление движения (нормализованное или ноль)
///
/// forward проецируется на горизонталь (y = 0, renormalize), right = forward × up.
/// Диагональ нормализуется — по диагонали не быстрее.
pub fn movement_direction(input: &InputSnapshot, forward: Vec3, up: Vec3) -> Vec3 {
    let flat_forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let right = flat_forward.cross(up);
    let right = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();

    let mut direction = Vec3::ZERO;
    if input.forward {
        direction += flat_forward;
    }
    if input.back {
        direction -= flat_forward;
    }
    if input.right {
        direction += right;
    }
    if input.left {
        direction -= right;
    }

    direction.normalize_or_zero()
}

/// Один шаг интегрирования (чистая функция, без ECS)
pub fn integrate(
    position: &mut Vec3,
    kinematics: &mut Kinematics,
    direction: Vec3,
    input: &InputSnapshot,
    config: &MovementConfig,
    dt: f32,
) {
    let speed = if input.sprint {
        config.move_speed * config.sprint_multiplier
    } else {
        config.move_speed
    };
    kinematics.velocity.x = direction.x * speed;
    kinematics.velocity.z = direction.z * speed;

    kinematics.velocity.y -= config.gravity * dt;
    if input.jump && kinematics.grounded {
        kinematics.velocity.y = config.jump_impulse;
        kinematics.grounded = false;
    }

    *position += kinematics.velocity * dt;

    // Пол: снап на высоту глаз
    if position.y <= config.eye_height {
        position.y = config.eye_height;
        kinematics.velocity.y = 0.0;
        kinematics.grounded = true;
    }
}

/// Система: input → kinematics → позиция игрока → поза камеры
pub fn player_movement(
    input: Res<InputSnapshot>,
    clock: Res<FrameClock>,
    config: Res<SimulationConfig>,
    mut camera: ResMut<CameraPose>,
    mut player: Query<(&mut Transform, &mut Kinematics), With<Player>>,
) {
    let Ok((mut transform, mut kinematics)) = player.single_mut() else {
        return;
    };

    let direction = movement_direction(&input, camera.forward, camera.up);
    let mut position = transform.translation;
    integrate(
        &mut position,
        &mut kinematics,
        direction,
        &input,
        &config.movement,
        clock.delta_secs,
    );

    // Не трогаем Transform без движения (Changed<Transform> → sync в host)
    if position != transform.translation {
        transform.translation = position;
    }
    camera.position = position;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(f: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
        let mut input = InputSnapshot::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_direction_relative_to_camera() {
        let forward = held(|i| i.forward = true);
        let right = held(|i| i.right = true);

        // Камера смотрит в -Z и чуть вниз: y отбрасывается
        let look = Vec3::new(0.0, -0.5, -1.0);
        assert!((movement_direction(&forward, look, Vec3::Y) - Vec3::NEG_Z).length() < 1e-6);
        assert!((movement_direction(&right, look, Vec3::Y) - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let input = held(|i| {
            i.forward = true;
            i.left = true;
        });
        let direction = movement_direction(&input, Vec3::NEG_Z, Vec3::Y);
        assert!((direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = held(|i| {
            i.forward = true;
            i.back = true;
        });
        assert_eq!(movement_direction(&input, Vec3::NEG_Z, Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn test_sprint_scales_speed() {
        let config = MovementConfig::default();
        let input = held(|i| i.sprint = true);
        let mut position = Vec3::new(0.0, 2.0, 0.0);
        let mut kinematics = Kinematics::default();

        integrate(&mut position, &mut kinematics, Vec3::X, &input, &config, 0.5);

        assert_eq!(kinematics.velocity.x, 16.0);
        assert_eq!(position.x, 8.0);
        assert_eq!(position.y, 2.0);
        assert!(kinematics.grounded);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let config = MovementConfig::default();
        let jump = held(|i| i.jump = true);
        let mut position = Vec3::new(0.0, 2.0, 0.0);
        let mut kinematics = Kinematics::default();

        integrate(&mut position, &mut kinematics, Vec3::ZERO, &jump, &config, 0.25);
        assert!(!kinematics.grounded);
        assert_eq!(kinematics.velocity.y, 10.0);
        assert_eq!(position.y, 4.5);

        // В воздухе прыжок игнорируется, гравитация тянет вниз
        integrate(&mut position, &mut kinematics, Vec3::ZERO, &jump, &config, 0.25);
        assert_eq!(kinematics.velocity.y, 2.5);
        assert!(!kinematics.grounded);

        // Приземление: снап на высоту глаз
        for _ in 0..4 {
            integrate(
                &mut position,
                &mut kinematics,
                Vec3::ZERO,
                &InputSnapshot::default(),
                &config,
                0.25,
            );
        }
        assert_eq!(position.y, config.eye_height);
        assert_eq!(kinematics.velocity.y, 0.0);
        assert!(kinematics.grounded);
    }
}

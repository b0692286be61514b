//! Level build: layout → ECS entities (walls, enemies, player)

use bevy::prelude::*;

use super::layout::{LevelLayout, Tile};
use crate::ai::enemy_bundle;
use crate::components::{Hitbox, Player, SecretWall, Wall};
use crate::config::SimulationConfig;
use crate::input::CameraPose;
use crate::logger;
use crate::player::{player_bundle, player_vitals};
use crate::presentation::{VisualHandle, VisualKind};

/// Что получилось после build
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub player: Entity,
    pub walls: usize,
    /// В порядке spawn points (построчно)
    pub enemies: Vec<Entity>,
    pub secret: Option<Entity>,
}

/// Спавнит уровень в world
///
/// - стены: `Wall` + `Hitbox::Cuboid` (центр на половине высоты)
/// - враги: Idle, полное HP, на высоте глаз (hitscan по центру экрана попадает в центр sprite)
/// - игрок: переиспользуется, если уже есть (vitals сбрасываются)
///
/// Визуалы attach'атся на ближайшем flush (`Added<VisualHandle>`).
pub fn build_level(world: &mut World, layout: &LevelLayout, config: &SimulationConfig) -> LevelSummary {
    let eye_height = config.movement.eye_height;
    let wall_y = layout.wall_height * 0.5;
    let half_extents = Vec3::new(
        layout.cell_size * 0.5,
        layout.wall_height * 0.5,
        layout.cell_size * 0.5,
    );

    let mut walls = 0;
    let mut enemies = Vec::new();
    let mut secret = None;
    let mut player_start = Vec3::new(0.0, eye_height, 0.0);

    for (col, row, tile) in layout.cells() {
        match tile {
            Tile::Floor => {}
            Tile::Wall | Tile::SecretWall => {
                let is_secret = tile == Tile::SecretWall;
                let mut wall = world.spawn((
                    Wall { secret: is_secret },
                    Hitbox::Cuboid { half_extents },
                    Transform::from_translation(layout.cell_center(col, row, wall_y)),
                    VisualHandle::new(VisualKind::Wall { secret: is_secret }),
                ));
                if is_secret {
                    wall.insert(SecretWall::new(wall_y));
                    secret = Some(wall.id());
                }
                walls += 1;
            }
            Tile::EnemySpawn => {
                let position = layout.cell_center(col, row, eye_height);
                enemies.push(world.spawn(enemy_bundle(position, &config.enemy)).id());
            }
            Tile::PlayerStart => {
                player_start = layout.cell_center(col, row, eye_height);
            }
        }
    }

    let existing = world
        .query_filtered::<Entity, With<Player>>()
        .iter(world)
        .next();
    let player = match existing {
        Some(entity) => {
            world.entity_mut(entity).insert((
                player_vitals(&config.player),
                Transform::from_translation(player_start),
            ));
            entity
        }
        None => world.spawn(player_bundle(player_start, &config.player)).id(),
    };

    if let Some(mut camera) = world.get_resource_mut::<CameraPose>() {
        camera.position = player_start;
    }

    logger::log_info(&format!(
        "Level built: {} walls, {} enemies, secret: {}, player at {:?}",
        walls,
        enemies.len(),
        secret.is_some(),
        player_start
    ));

    LevelSummary {
        player,
        walls,
        enemies,
        secret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AIState;
    use crate::components::{Health, PlayerVitals};

    #[test]
    fn test_build_small_level() {
        let mut world = World::new();
        let config = SimulationConfig::default();
        let layout = LevelLayout::from_rows(&["#S#", "EP.", "..E"], 4.0, 4.0).unwrap();

        let summary = build_level(&mut world, &layout, &config);

        assert_eq!(summary.walls, 3);
        assert_eq!(summary.enemies.len(), 2);

        let secret = summary.secret.unwrap();
        assert!(world.get::<Wall>(secret).unwrap().secret);
        assert_eq!(world.get::<SecretWall>(secret).unwrap().base_y, 2.0);

        let enemy = summary.enemies[0];
        assert_eq!(*world.get::<AIState>(enemy).unwrap(), AIState::Idle);
        assert_eq!(world.get::<Health>(enemy).unwrap().current, 100);
        assert_eq!(
            world.get::<Transform>(enemy).unwrap().translation,
            Vec3::new(0.0, 2.0, 4.0)
        );

        assert_eq!(
            world.get::<Transform>(summary.player).unwrap().translation,
            Vec3::new(4.0, 2.0, 4.0)
        );
    }

    #[test]
    fn test_rebuild_reuses_player() {
        let mut world = World::new();
        let config = SimulationConfig::default();
        let layout = LevelLayout::from_rows(&["P"], 4.0, 4.0).unwrap();

        let first = build_level(&mut world, &layout, &config);
        world.get_mut::<PlayerVitals>(first.player).unwrap().hp = 3.0;

        let second = build_level(&mut world, &layout, &config);
        assert_eq!(first.player, second.player);
        assert_eq!(world.get::<PlayerVitals>(second.player).unwrap().hp, 100.0);
    }
}

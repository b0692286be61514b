//! Enemy AI: sight check + chase + contact damage.

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState, Enemy, EnemyAlerted};
use crate::assets::names;
use crate::combat::CombatEffects;
use crate::components::{DamageFlash, Health, Player, PlayerVitals};
use crate::logger;
use crate::presentation::PresentationEvent;

/// Система: AI тик для каждого живого врага
///
/// 1. Idle + дистанция < sight_range → Chase (appearance "enemy_chase" + alert cue, один раз)
/// 2. Chase: поворот к игроку только по yaw
/// 3. Chase: дистанция > attack_range → шаг `speed * dt` по горизонтали,
///    иначе contact damage (фиксированный за ТИК, не зависит от dt)
///
/// Дистанция — полная 3D (высота игрока учитывается).
pub fn enemy_ai(
    mut player: Query<(Entity, &Transform, &mut PlayerVitals, &mut DamageFlash), With<Player>>,
    mut enemies: Query<
        (Entity, &mut Transform, &mut AIState, &AIConfig, &Health),
        (With<Enemy>, Without<Player>),
    >,
    mut alerted: EventWriter<EnemyAlerted>,
    mut effects: CombatEffects,
) {
    let Ok((player_entity, player_transform, mut vitals, mut player_flash)) = player.single_mut()
    else {
        return;
    };
    let player_pos = player_transform.translation;
    let dt = effects.clock.delta_secs;

    for (entity, mut transform, mut state, ai, health) in enemies.iter_mut() {
        if !health.is_alive() {
            continue;
        }

        let distance = transform.translation.distance(player_pos);

        if *state == AIState::Idle && distance < ai.sight_range {
            *state = AIState::Chase;
            effects.presentation.write(PresentationEvent::Appearance {
                entity,
                texture: names::ENEMY_CHASE,
            });
            effects.play_sound(names::SOUND_ENEMY_ALERT);
            alerted.write(EnemyAlerted { entity, distance });
            logger::log_info(&format!(
                "👁 Enemy {:?}: Idle → Chase (distance {:.1})",
                entity, distance
            ));
        }

        if !state.is_chasing() {
            continue;
        }

        // Yaw-only: цель на высоте самого врага
        let flat_target = Vec3::new(player_pos.x, transform.translation.y, player_pos.z);
        let to_player = flat_target - transform.translation;
        if to_player.length_squared() > f32::EPSILON {
            transform.look_at(flat_target, Vec3::Y);
        }

        if distance > ai.attack_range {
            transform.translation += to_player.normalize_or_zero() * ai.speed * dt;
        } else {
            effects.damage_player(
                player_entity,
                &mut vitals,
                &mut player_flash,
                ai.contact_damage,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use crate::combat::EnemyKilled;
    use crate::config::SimulationConfig;
    use crate::frame::FrameClock;

    fn setup(enemy_at: Vec3) -> (World, Entity, Entity) {
        let mut world = World::new();
        world.init_resource::<SimulationConfig>();
        world.insert_resource(FrameClock {
            now_ms: 500.0,
            delta_secs: 0.5,
            frame: 1,
        });
        world.init_resource::<Events<PresentationEvent>>();
        world.init_resource::<Events<EnemyKilled>>();
        world.init_resource::<Events<EnemyAlerted>>();

        let player = world
            .spawn((Player, Transform::from_xyz(0.0, 2.0, 0.0)))
            .id();
        let enemy = world
            .spawn((Enemy, Transform::from_translation(enemy_at)))
            .id();
        (world, player, enemy)
    }

    #[test]
    fn test_far_enemy_stays_idle() {
        let (mut world, _, enemy) = setup(Vec3::new(0.0, 2.0, -30.0));
        world.run_system_once(enemy_ai).unwrap();

        assert_eq!(*world.get::<AIState>(enemy).unwrap(), AIState::Idle);
        assert_eq!(
            world.get::<Transform>(enemy).unwrap().translation,
            Vec3::new(0.0, 2.0, -30.0)
        );
    }

    #[test]
    fn test_chase_moves_and_faces_player() {
        let (mut world, _, enemy) = setup(Vec3::new(0.0, 2.0, -20.0));
        world.run_system_once(enemy_ai).unwrap();

        assert_eq!(*world.get::<AIState>(enemy).unwrap(), AIState::Chase);
        let transform = world.get::<Transform>(enemy).unwrap();
        // speed 4.0 * dt 0.5
        assert!((transform.translation.z - -18.0).abs() < 1e-5);
        assert!((transform.forward().z - 1.0).abs() < 1e-5);

        let alerts = world.resource::<Events<EnemyAlerted>>();
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_contact_damage_is_per_tick() {
        let (mut world, player, _) = setup(Vec3::new(0.0, 2.0, -1.5));
        world.run_system_once(enemy_ai).unwrap();
        world.run_system_once(enemy_ai).unwrap();

        let vitals = world.get::<PlayerVitals>(player).unwrap();
        assert!((vitals.hp - 99.8).abs() < 1e-4);
        assert!(world.get::<DamageFlash>(player).unwrap().is_active());
    }
}

//! Projectile subsystem: spawn, advance, proximity hit, lifetime
//!
//! Тик для каждого projectile:
//! 1. translation += velocity * dt
//! 2. первый живой враг (порядок итерации, НЕ ближайший) с дистанцией < proximity_radius
//!    → полный урон, projectile удаляется
//! 3. иначе удаляется, когда FrameClock дошёл до deadline (возраст считается
//!    с начала тика спавна: в этом тике снаряд уже двигается)
//!
//! Splash нет: Aoe резолвится ровно как Projectile.

use bevy::prelude::*;

use super::damage::CombatEffects;
use super::weapon_stats::{DamageKind, WeaponStats};
use crate::ai::Enemy;
use crate::components::{DamageFlash, Health};
use crate::logger;
use crate::presentation::{VisualHandle, VisualKind};

/// Летящий снаряд
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Projectile {
    pub velocity: Vec3,
    pub kind: DamageKind,
    pub damage: i32,
    /// `FrameClock::now_ms`, начиная с которого снаряд удаляется
    pub expires_at_ms: f64,
}

/// Допуск на округление f32 dt при сравнении с deadline
const EXPIRY_EPSILON_MS: f64 = 1e-3;

impl Projectile {
    /// Скорость такая, что за lifetime снаряд пролетает ровно range оружия
    pub fn from_weapon(
        weapon: &WeaponStats,
        direction: Dir3,
        lifetime: f32,
        born_ms: f64,
    ) -> Self {
        Self {
            velocity: *direction * weapon.projectile_speed(lifetime),
            kind: weapon.kind,
            damage: weapon.damage,
            expires_at_ms: born_ms + f64::from(lifetime) * 1000.0,
        }
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms + EXPIRY_EPSILON_MS >= self.expires_at_ms
    }
}

/// Спавнит один projectile (один на выстрел)
pub fn spawn_projectile(
    effects: &mut CombatEffects<'_, '_>,
    weapon: &WeaponStats,
    origin: Vec3,
    direction: Dir3,
) -> Entity {
    let lifetime = effects.config.combat.projectile_lifetime;
    let spawn_at = origin + *direction * effects.config.combat.projectile_spawn_offset;
    let clock = *effects.clock;
    let born_ms = clock.now_ms - f64::from(clock.delta_secs) * 1000.0;
    let projectile = Projectile::from_weapon(weapon, direction, lifetime, born_ms);

    effects
        .commands
        .spawn((
            projectile,
            Transform::from_translation(spawn_at).looking_to(direction, Vec3::Y),
            VisualHandle::new(VisualKind::Projectile { kind: weapon.kind }),
        ))
        .id()
}

/// Система: движение + proximity hit + lifetime
pub fn advance_projectiles(
    mut projectiles: Query<(Entity, &mut Transform, &Projectile)>,
    mut enemies: Query<
        (Entity, &Transform, &mut Health, &mut DamageFlash),
        (With<Enemy>, Without<Projectile>),
    >,
    mut effects: CombatEffects,
) {
    let dt = effects.clock.delta_secs;
    let radius = effects.config.combat.proximity_radius;

    let now_ms = effects.clock.now_ms;

    for (entity, mut transform, projectile) in projectiles.iter_mut() {
        transform.translation += projectile.velocity * dt;
        let position = transform.translation;

        let target = enemies
            .iter_mut()
            .find(|(_, enemy_transform, health, _)| {
                health.is_alive() && enemy_transform.translation.distance(position) < radius
            });

        if let Some((enemy, _, mut health, mut flash)) = target {
            effects.damage_enemy(
                enemy,
                &mut health,
                &mut flash,
                projectile.damage,
                projectile.kind,
            );
            effects.commands.entity(entity).despawn();
            continue;
        }

        if projectile.is_expired(now_ms) {
            effects.commands.entity(entity).despawn();
            logger::log(&format!("Projectile {:?} expired at {:?}", entity, position));
        }
    }
}

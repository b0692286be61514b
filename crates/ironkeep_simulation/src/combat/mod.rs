//! Combat system module
//!
//! ECS ответственность:
//! - Weapon catalog + loadout (fire gate, смена слота)
//! - Hit detection: hitscan (ray vs hitbox) и proximity (projectile)
//! - Damage application, kill transition, damage flash
//!
//! Host ответственность: только отображение (визуалы, звук) через `PresentationEvent`.

use bevy::prelude::*;

use crate::frame::{FrameSet, FrameTick};

pub mod damage;
pub mod firing;
pub mod projectile;
pub mod raycast;
pub mod weapon_stats;

// Re-export основных типов
pub use damage::{expire_damage_flashes, CombatEffects, EnemyKilled};
pub use firing::{apply_weapon_commands, fire_weapon, WeaponFired};
pub use projectile::{advance_projectiles, spawn_projectile, Projectile};
pub use raycast::{cast_ray, nearest_hit, RayHit};
pub use weapon_stats::{DamageKind, WeaponLoadout, WeaponSlot, WeaponStats, WEAPON_CATALOG};

/// Combat Plugin
///
/// Системы по фазам тика:
/// 1. Commands — apply_weapon_commands (смена оружия до выстрела)
/// 2. Weapons — fire_weapon
/// 3. Projectiles — advance_projectiles
/// 4. Feedback — expire_damage_flashes
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFired>()
            .add_event::<EnemyKilled>();

        app.add_systems(
            FrameTick,
            (
                apply_weapon_commands.in_set(FrameSet::Commands),
                fire_weapon.in_set(FrameSet::Weapons),
                advance_projectiles.in_set(FrameSet::Projectiles),
                expire_damage_flashes.in_set(FrameSet::Feedback),
            ),
        );
    }
}

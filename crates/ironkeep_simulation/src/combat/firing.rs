//! Weapon switching (command queue) + fire resolution
//!
//! Fire pipeline (один раз за тик, пока fire зажат):
//! 1. fire gate (`WeaponLoadout::try_fire`) — провал = ничего не происходит
//! 2. WeaponFired + sound cue (ДО резолва урона)
//! 3. Hitscan: ray из центра экрана по врагам, урон если ближайший hit <= range
//!    Projectile/Aoe: спавн одного projectile

use bevy::prelude::*;

use super::damage::CombatEffects;
use super::projectile::spawn_projectile;
use super::raycast::nearest_hit;
use super::weapon_stats::{DamageKind, WeaponLoadout, WeaponSlot};
use crate::ai::Enemy;
use crate::components::{DamageFlash, Health, Hitbox, Player};
use crate::input::{CameraPose, InputSnapshot, PlayerCommand, WeaponCommands};
use crate::logger;

/// Событие: выстрел прошёл fire gate
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub slot: WeaponSlot,
    pub kind: DamageKind,
}

/// Система: дренирует очередь команд (смена оружия мгновенная)
///
/// Невалидный индекс — ошибка host'а: логируем и выбрасываем.
pub fn apply_weapon_commands(
    mut queue: ResMut<WeaponCommands>,
    mut player: Query<&mut WeaponLoadout, With<Player>>,
) {
    if queue.is_empty() {
        return;
    }
    let Ok(mut loadout) = player.single_mut() else {
        queue.drain().for_each(drop);
        return;
    };

    for command in queue.drain() {
        match command {
            PlayerCommand::SelectWeapon(index) => match WeaponSlot::new(index) {
                Some(slot) => {
                    if loadout.select(slot) {
                        logger::log(&format!("Weapon switched → {}", slot.stats().name));
                    }
                }
                None => logger::log_error(&format!(
                    "❌ SelectWeapon({}) out of range, dropped",
                    index
                )),
            },
        }
    }
}

/// Система: fire gate + hitscan / projectile spawn
pub fn fire_weapon(
    input: Res<InputSnapshot>,
    camera: Res<CameraPose>,
    mut player: Query<&mut WeaponLoadout, With<Player>>,
    mut enemies: Query<(Entity, &Transform, &Hitbox, &mut Health, &mut DamageFlash), With<Enemy>>,
    mut fired: EventWriter<WeaponFired>,
    mut effects: CombatEffects,
) {
    if !input.fire {
        return;
    }
    let Ok(mut loadout) = player.single_mut() else {
        return;
    };
    let Some(weapon) = loadout.try_fire(effects.clock.now_ms) else {
        return;
    };

    fired.write(WeaponFired {
        slot: loadout.current,
        kind: weapon.kind,
    });
    effects.play_sound(weapon.fire_sound);

    let origin = camera.position;
    let direction = camera.view_direction();

    if weapon.kind.is_ballistic() {
        let projectile = spawn_projectile(&mut effects, weapon, origin, direction);
        logger::log(&format!("{} fired projectile {:?}", weapon.name, projectile));
        return;
    }

    let hit = nearest_hit(
        origin,
        direction,
        enemies
            .iter()
            .filter(|(_, _, _, health, _)| health.is_alive())
            .map(|(entity, transform, hitbox, _, _)| (entity, transform, hitbox)),
    );

    let Some(hit) = hit.filter(|hit| hit.distance <= weapon.range) else {
        logger::log(&format!("{} missed", weapon.name));
        return;
    };

    if let Ok((entity, _, _, mut health, mut flash)) = enemies.get_mut(hit.entity) {
        effects.damage_enemy(entity, &mut health, &mut flash, weapon.damage, weapon.kind);
    }
}


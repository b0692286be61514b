//! Damage application + kill transition + damage flash
//!
//! Все пути урона (hitscan, projectile, enemy contact) идут через `CombatEffects`:
//! - враг: `Health::take_damage` → Wounded (flash) / Killed (despawn, death cue, EnemyKilled)
//! - игрок: `PlayerVitals::take_damage` (без нижней границы) + flash
//!
//! Flash: deadline на entity, откат проверяется раз в тик (`expire_damage_flashes`).
//! Tint получают только entity с визуалом; flash игрока виден в HUD (`HudSnapshot::flash`).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::assets::names;
use crate::combat::DamageKind;
use crate::components::{DamageFlash, DamageOutcome, Health, PlayerVitals};
use crate::config::SimulationConfig;
use crate::frame::FrameClock;
use crate::logger;
use crate::presentation::{PresentationEvent, Tint, VisualHandle};

/// Событие: враг убит (hp пересёк 0 этим ударом)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyKilled {
    pub entity: Entity,
    pub source: DamageKind,
}

/// Общие side-effects боевых систем
///
/// Один `EventWriter<PresentationEvent>` на систему — поэтому fire/projectile/AI
/// пишут эффекты только через этот param.
#[derive(SystemParam)]
pub struct CombatEffects<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub presentation: EventWriter<'w, PresentationEvent>,
    pub killed: EventWriter<'w, EnemyKilled>,
    pub clock: Res<'w, FrameClock>,
    pub config: Res<'w, SimulationConfig>,
}

impl CombatEffects<'_, '_> {
    pub fn play_sound(&mut self, name: &'static str) {
        self.presentation.write(PresentationEvent::sound(name));
    }

    /// Продлевает flash; tint шлём только при включении (повторный удар только двигает deadline)
    pub fn flash(&mut self, entity: Entity, flash: &mut DamageFlash) {
        let was_active = flash.is_active();
        flash.trigger(self.clock.now_ms, self.config.combat.flash_duration_ms);
        if !was_active {
            self.presentation.write(PresentationEvent::Tint {
                entity,
                tint: Some(Tint::DAMAGE),
            });
        }
    }

    /// Урон врагу; на мёртвом — no-op
    pub fn damage_enemy(
        &mut self,
        entity: Entity,
        health: &mut Health,
        flash: &mut DamageFlash,
        amount: i32,
        source: DamageKind,
    ) -> DamageOutcome {
        let outcome = health.take_damage(amount);

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded => {
                self.flash(entity, flash);
                logger::log(&format!(
                    "Enemy {:?} hit for {} ({:?}), hp {}",
                    entity, amount, source, health.current
                ));
            }
            DamageOutcome::Killed => {
                // Despawn → RemovedComponents<VisualHandle> → detach на flush
                self.commands.entity(entity).despawn();
                self.play_sound(names::SOUND_ENEMY_DEATH);
                self.killed.write(EnemyKilled { entity, source });
                logger::log_info(&format!(
                    "☠ Enemy {:?} killed by {:?} ({} dmg)",
                    entity, source, amount
                ));
            }
        }

        outcome
    }

    /// Урон игроку (HP может уйти в минус)
    pub fn damage_player(
        &mut self,
        entity: Entity,
        vitals: &mut PlayerVitals,
        flash: &mut DamageFlash,
        amount: f32,
    ) {
        let was_dead = vitals.is_dead();
        vitals.take_damage(amount);
        // У игрока нет визуала — только deadline, без tint
        flash.trigger(self.clock.now_ms, self.config.combat.flash_duration_ms);

        if !was_dead && vitals.is_dead() {
            logger::log_info(&format!("Player {:?} hp dropped to {:.1}", entity, vitals.hp));
        }
    }
}

/// Система: откат истёкших flash (tint → None для entity с визуалом)
///
/// Работает и без control: flash смертельного удара тоже откатывается.
pub fn expire_damage_flashes(
    clock: Res<FrameClock>,
    mut flashes: Query<(Entity, &mut DamageFlash, Has<VisualHandle>)>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    for (entity, mut flash, has_visual) in flashes.iter_mut() {
        if !flash.is_active() {
            continue;
        }
        if flash.expire(clock.now_ms) && has_visual {
            presentation.write(PresentationEvent::Tint { entity, tint: None });
        }
    }
}

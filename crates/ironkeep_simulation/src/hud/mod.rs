//! HUD projection: player state → `HudSnapshot` (read-only для host)
//!
//! Работает каждый тик, даже когда control неактивен.
//! Пока HP <= 0 — каждый тик шлёт `ExitControl` (без дедупликации) и держит control выключенным.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assets::names;
use crate::combat::{WeaponLoadout, WeaponStats};
use crate::components::{Ammo, DamageFlash, Player, PlayerVitals};
use crate::config::SimulationConfig;
use crate::input::ControlState;
use crate::logger;
use crate::presentation::PresentationEvent;

/// Портрет в HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceState {
    #[default]
    Healthy,
    Hurt,
    Dead,
}

impl FaceState {
    /// Dead: hp <= 0, Hurt: hp < threshold (строго), иначе Healthy
    pub fn from_hp(hp: f32, hurt_threshold: f32) -> Self {
        if hp <= 0.0 {
            FaceState::Dead
        } else if hp < hurt_threshold {
            FaceState::Hurt
        } else {
            FaceState::Healthy
        }
    }

    pub fn texture_name(self) -> &'static str {
        match self {
            FaceState::Healthy => names::FACE_HEALTHY,
            FaceState::Hurt => names::FACE_HURT,
            FaceState::Dead => names::FACE_DEAD,
        }
    }
}

/// То, что видит игрок в HUD
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub hp: f32,
    pub armor: i32,
    /// `"<current> | <weaponName>"`
    pub ammo: String,
    pub face: FaceState,
    /// Damage flash игрока активен (host подкрашивает экран)
    pub flash: bool,
}

pub fn format_ammo(ammo: &Ammo, weapon: &WeaponStats) -> String {
    format!("{} | {}", ammo.current, weapon.name)
}

/// Система: player → HudSnapshot (+ exit control пока мёртв)
pub fn project_hud(
    player: Query<(&PlayerVitals, &WeaponLoadout, &DamageFlash), With<Player>>,
    config: Res<SimulationConfig>,
    mut hud: ResMut<HudSnapshot>,
    mut control: ResMut<ControlState>,
    mut presentation: EventWriter<PresentationEvent>,
) {
    let Ok((vitals, loadout, flash)) = player.single() else {
        return;
    };

    let snapshot = HudSnapshot {
        hp: vitals.hp,
        armor: vitals.armor,
        ammo: format_ammo(&vitals.ammo, loadout.active()),
        face: FaceState::from_hp(vitals.hp, config.combat.hurt_threshold),
        flash: flash.is_active(),
    };
    // set_if_neq: не триггерим Changed<HudSnapshot> без нужды
    hud.set_if_neq(snapshot);

    if vitals.is_dead() {
        if control.active {
            logger::log_info(&format!(
                "💀 Player died (hp {:.1}), releasing control",
                vitals.hp
            ));
            control.active = false;
        }
        presentation.write(PresentationEvent::ExitControl);
    }
}

/// HUD Plugin
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudSnapshot>().add_systems(
            crate::frame::FrameTick,
            project_hud.in_set(crate::frame::FrameSet::Hud),
        );
    }
}

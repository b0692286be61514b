//! Session counters (для итогового summary headless runner'а)

use bevy::prelude::*;
use serde::Serialize;

use crate::ai::EnemyAlerted;
use crate::combat::{EnemyKilled, WeaponFired};

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub shots: u32,
    pub kills: u32,
    pub alerts: u32,
}

/// Система: считает события тика (фаза Hud — работает и без control)
pub fn tally_session_stats(
    mut stats: ResMut<SessionStats>,
    mut fired: EventReader<WeaponFired>,
    mut killed: EventReader<EnemyKilled>,
    mut alerted: EventReader<EnemyAlerted>,
) {
    stats.shots += fired.read().count() as u32;
    stats.kills += killed.read().count() as u32;
    stats.alerts += alerted.read().count() as u32;
}

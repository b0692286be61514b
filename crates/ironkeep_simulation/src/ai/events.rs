//! AI Events

use bevy::prelude::*;

/// Враг заметил игрока (Idle → Chase), шлётся ровно один раз на врага
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyAlerted {
    pub entity: Entity,
    /// Дистанция до игрока в момент перехода
    pub distance: f32,
}

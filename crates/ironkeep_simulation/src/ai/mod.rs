//! AI decision-making module
//!
//! Simple FSM: Idle → Chase по дистанции до игрока (one-way).
//! Враги — billboard sprites, pathfinding нет: движение по прямой к игроку.

use bevy::prelude::*;

use crate::frame::{FrameSet, FrameTick};

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{enemy_bundle, AIConfig, AIState, Enemy};
pub use events::EnemyAlerted;
pub use systems::enemy_ai;

/// AI Plugin
///
/// Регистрирует `enemy_ai` в фазе `FrameSet::Enemies`
/// (после projectiles: убитые в этом тике враги уже despawn'нуты).
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyAlerted>()
            .add_systems(FrameTick, enemy_ai.in_set(FrameSet::Enemies));
    }
}

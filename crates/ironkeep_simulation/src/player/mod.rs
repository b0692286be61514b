//! Player domain: spawn + kinematics

use bevy::prelude::*;

use crate::components::{Ammo, Player, PlayerVitals};
use crate::config::PlayerConfig;
use crate::frame::{FrameSet, FrameTick};

pub mod movement;

pub use movement::{integrate, movement_direction, player_movement};

/// Стартовые vitals из config
pub fn player_vitals(config: &PlayerConfig) -> PlayerVitals {
    PlayerVitals {
        hp: config.hp,
        armor: config.armor,
        ammo: Ammo {
            current: config.ammo,
            max: config.max_ammo,
        },
    }
}

/// Bundle игрока (позиция = глаза)
pub fn player_bundle(eye_position: Vec3, config: &PlayerConfig) -> impl Bundle {
    (
        Player,
        player_vitals(config),
        Transform::from_translation(eye_position),
    )
}

/// Player Plugin
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FrameTick, player_movement.in_set(FrameSet::Player));
    }
}

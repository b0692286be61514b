//! Level domain: layout, build, environment trigger (secret wall)

use bevy::prelude::*;

use crate::frame::{FrameSet, FrameTick};

pub mod build;
pub mod layout;
pub mod secret;

pub use build::{build_level, LevelSummary};
pub use layout::{LevelError, LevelLayout, Tile};
pub use secret::{lowered_height, secret_wall_trigger};

/// Level Plugin (environment trigger в фазе `FrameSet::Environment`)
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FrameTick, secret_wall_trigger.in_set(FrameSet::Environment));
    }
}

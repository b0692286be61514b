//! Movement компоненты: kinematic state игрока

use bevy::prelude::*;

/// Kinematic state (velocity интегрируем сами, без физ. движка)
///
/// Коллизия только с полом (высота глаз), стен нет.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Kinematics {
    pub velocity: Vec3,
    /// На полу — можно прыгать
    pub grounded: bool,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: true,
        }
    }
}

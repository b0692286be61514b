//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье врагов, vitals игрока, damage flash
//! - movement: kinematic state игрока
//! - player: player marker (singleton)
//! - world: hitbox shapes, стены, secret wall

pub mod actor;
pub mod movement;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
pub use world::*;

//! AI systems

pub mod chase;

// Re-export all systems
pub use chase::*;

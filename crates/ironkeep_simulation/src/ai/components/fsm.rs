//! FSM AI components (state machine, per-enemy tuning).

use bevy::prelude::*;

use crate::components::{DamageFlash, Health, Hitbox};
use crate::config::EnemyConfig;
use crate::presentation::{VisualHandle, VisualKind};

/// AI FSM состояния
///
/// Переход только Idle → Chase (one-way, назад не возвращаемся).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Idle — начальное состояние после спавна
    #[default]
    Idle,

    /// Chase — игрок замечен: поворот к нему, сближение, contact damage
    Chase,
}

impl AIState {
    pub fn is_chasing(self) -> bool {
        matches!(self, AIState::Chase)
    }
}

/// Параметры AI (копируются из `EnemyConfig` при спавне)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AIConfig {
    /// Idle → Chase когда дистанция до игрока строго меньше
    pub sight_range: f32,
    /// Ближе (или равно) — атака вместо движения
    pub attack_range: f32,
    /// Units/sec по горизонтали
    pub speed: f32,
    /// Урон игроку за тик в attack range
    pub contact_damage: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self::from(&EnemyConfig::default())
    }
}

impl From<&EnemyConfig> for AIConfig {
    fn from(config: &EnemyConfig) -> Self {
        Self {
            sight_range: config.sight_range,
            attack_range: config.attack_range,
            speed: config.speed,
            contact_damage: config.contact_damage_per_tick,
        }
    }
}

/// Marker: враг
///
/// Пока жив — в активном наборе. При hp <= 0 despawn (не пересоздаётся).
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(AIState, AIConfig, Health, DamageFlash, Transform)]
pub struct Enemy;

/// Bundle для спавна врага в точке
pub fn enemy_bundle(position: Vec3, config: &EnemyConfig) -> impl Bundle {
    (
        Enemy,
        AIConfig::from(config),
        Health::new(config.hp),
        Hitbox::Sphere {
            radius: config.hitbox_radius,
        },
        Transform::from_translation(position),
        VisualHandle::new(VisualKind::Enemy),
    )
}

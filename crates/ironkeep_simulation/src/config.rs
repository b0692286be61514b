//! Simulation tuning (data-driven, JSON)
//!
//! Все константы геймплея живут здесь, а не в системах.
//! `#[serde(default)]` — частичный JSON переопределяет только указанные поля.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Корневой config ресурс
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub movement: MovementConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub combat: CombatConfig,
    pub secret: SecretWallConfig,
}

/// Kinematic параметры игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Базовая скорость (units/sec)
    pub move_speed: f32,
    /// Множитель при зажатом sprint
    pub sprint_multiplier: f32,
    /// Гравитация (units/sec², положительное число, тянет вниз)
    pub gravity: f32,
    /// Вертикальная скорость прыжка
    pub jump_impulse: f32,
    /// Высота глаз = высота "пола" для камеры
    pub eye_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            sprint_multiplier: 1.6,
            gravity: 30.0,
            jump_impulse: 10.0,
            eye_height: 2.0,
        }
    }
}

/// Стартовые значения игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub hp: f32,
    pub armor: i32,
    pub ammo: u32,
    pub max_ammo: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hp: 100.0,
            armor: 0,
            ammo: 100,
            max_ammo: 200,
        }
    }
}

/// Параметры врагов (одинаковые для всех spawn points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub hp: i32,
    pub speed: f32,
    pub attack_range: f32,
    pub sight_range: f32,
    pub hitbox_radius: f32,
    /// Урон игроку за тик в attack range (НЕ умножается на dt)
    pub contact_damage_per_tick: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            hp: 100,
            speed: 4.0,
            attack_range: 2.0,
            sight_range: 25.0,
            hitbox_radius: 1.0,
            contact_damage_per_tick: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Время жизни projectile (секунды)
    pub projectile_lifetime: f32,
    /// Смещение точки спавна projectile вперёд от камеры
    pub projectile_spawn_offset: f32,
    /// Proximity hit: дистанция строго меньше этого значения
    pub proximity_radius: f32,
    /// Длительность color flash после урона (ms)
    pub flash_duration_ms: f64,
    /// HP ниже порога → face "hurt"
    pub hurt_threshold: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            projectile_lifetime: 2.0,
            projectile_spawn_offset: 1.0,
            proximity_radius: 2.0,
            flash_duration_ms: 100.0,
            hurt_threshold: 50.0,
        }
    }
}

/// Secret wall trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretWallConfig {
    pub interact_distance: f32,
    /// Шаг опускания за тик (НЕ умножается на dt)
    pub step_per_tick: f32,
    pub floor_offset: f32,
}

impl Default for SecretWallConfig {
    fn default() -> Self {
        Self {
            interact_distance: 4.0,
            step_per_tick: 0.1,
            floor_offset: -5.0,
        }
    }
}

/// Ошибка загрузки config
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config read failed: {err}"),
            Self::Parse(err) => write!(f, "config parse failed: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SimulationConfig::from_json_str(r#"{ "enemy": { "speed": 6.5 } }"#).unwrap();

        assert_eq!(config.enemy.speed, 6.5);
        assert_eq!(config.enemy.sight_range, 25.0);
        assert_eq!(config.movement, MovementConfig::default());
        assert_eq!(config.secret.floor_offset, -5.0);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SimulationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse failed"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimulationConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

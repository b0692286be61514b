//! Базовые компоненты комбатантов: Health (враги), PlayerVitals (игрок), DamageFlash

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Здоровье врага (целое)
///
/// Инвариант: current никогда не растёт (лечения нет).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Результат применения урона к Health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Цель уже мертва — урон проигнорирован
    Ignored,
    Wounded,
    /// HP пересёк 0 именно этим ударом
    Killed,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Уменьшает HP; на мёртвой цели — no-op
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        // Отрицательный урон не лечит
        self.current = self.current.saturating_sub(amount.max(0));
        if self.is_alive() {
            DamageOutcome::Wounded
        } else {
            DamageOutcome::Killed
        }
    }
}

/// Боезапас (только отображение в HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
}

/// Состояние игрока, которое видит HUD
///
/// HP дробное: enemy contact drain идёт по 0.1 за тик.
/// Нижней границы нет — HP может уйти в минус.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerVitals {
    pub hp: f32,
    pub armor: i32,
    pub ammo: Ammo,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self {
            hp: 100.0,
            armor: 0,
            ammo: Ammo {
                current: 100,
                max: 200,
            },
        }
    }
}

impl PlayerVitals {
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.hp -= amount;
    }
}

/// Deadline для отката color flash
///
/// Каждый новый удар перезаписывает deadline (last-writer-wins, без очереди).
/// Откат проверяется раз в тик в `expire_damage_flashes`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DamageFlash {
    pub expires_at_ms: Option<f64>,
}

impl DamageFlash {
    pub fn trigger(&mut self, now_ms: f64, duration_ms: f64) {
        self.expires_at_ms = Some(now_ms + duration_ms);
    }

    pub fn is_active(&self) -> bool {
        self.expires_at_ms.is_some()
    }

    /// true ровно один раз — когда deadline истёк
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.expires_at_ms {
            Some(deadline) if now_ms >= deadline => {
                self.expires_at_ms = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_kill_transition_once() {
        let mut health = Health::new(20);

        assert_eq!(health.take_damage(15), DamageOutcome::Wounded);
        assert_eq!(health.current, 5);

        assert_eq!(health.take_damage(15), DamageOutcome::Killed);
        assert_eq!(health.current, -10);
        assert!(!health.is_alive());

        // Повторный вызов на мёртвой цели ничего не меняет
        assert_eq!(health.take_damage(15), DamageOutcome::Ignored);
        assert_eq!(health.current, -10);
    }

    #[test]
    fn test_health_never_increases() {
        let mut health = Health::new(50);
        health.take_damage(-30);
        assert_eq!(health.current, 50);

        let mut health = Health::new(1);
        assert_eq!(health.take_damage(i32::MAX), DamageOutcome::Killed);
        assert!(health.current < 0);
    }

    #[test]
    fn test_player_hp_has_no_floor() {
        let mut vitals = PlayerVitals::default();
        vitals.take_damage(100.0);
        assert!(vitals.is_dead());

        vitals.take_damage(5.0);
        assert_eq!(vitals.hp, -5.0);
    }

    #[test]
    fn test_flash_last_writer_wins() {
        let mut flash = DamageFlash::default();
        flash.trigger(0.0, 100.0);
        flash.trigger(60.0, 100.0);

        assert!(!flash.expire(120.0));
        assert!(flash.is_active());
        assert!(flash.expire(160.0));
        assert!(!flash.expire(200.0));
    }
}

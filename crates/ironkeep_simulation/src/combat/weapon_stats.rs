//! Weapon catalog (4 фиксированных слота) + player loadout
//!
//! Architecture:
//! - `WEAPON_CATALOG` — static table, immutable
//! - `WeaponSlot` — валидированный индекс 0..=3 (невалидный индекс не доходит до геймплея)
//! - `WeaponLoadout` — component игрока: текущий слот + timestamp последнего выстрела
//!
//! Fire gate: `now - last_fire > fire_delay` (строго больше).
//! Смена слота НЕ сбрасывает и НЕ переносит cooldown — timestamp общий.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Способ доставки урона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum DamageKind {
    /// Мгновенный ray от центра экрана
    Hitscan,
    /// Летящий projectile, proximity hit
    Projectile,
    /// Объявлен в каталоге, резолвится так же как Projectile (одна цель, без splash)
    Aoe,
}

impl DamageKind {
    /// Спавнит ли выстрел projectile entity
    pub fn is_ballistic(self) -> bool {
        matches!(self, DamageKind::Projectile | DamageKind::Aoe)
    }
}

/// Статы оружия (catalog entry)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub name: &'static str,
    pub damage: i32,
    /// Дальность (world units). Для projectile: скорость = range / lifetime
    pub range: f32,
    /// Минимальная пауза между выстрелами (ms)
    pub fire_delay_ms: f64,
    pub kind: DamageKind,
    /// Sound cue, играется до резолва урона
    pub fire_sound: &'static str,
}

impl WeaponStats {
    /// Скорость projectile: за lifetime пролетает ровно range
    pub fn projectile_speed(&self, lifetime: f32) -> f32 {
        if lifetime <= 0.0 {
            return 0.0;
        }
        self.range / lifetime
    }
}

pub const WEAPON_CATALOG: [WeaponStats; 4] = [
    WeaponStats {
        name: "Knuckles",
        damage: 10,
        range: 3.0,
        fire_delay_ms: 500.0,
        kind: DamageKind::Hitscan,
        fire_sound: "knuckles",
    },
    WeaponStats {
        name: "Shotgun",
        damage: 80,
        range: 15.0,
        fire_delay_ms: 1000.0,
        kind: DamageKind::Hitscan,
        fire_sound: "shotgun",
    },
    WeaponStats {
        name: "Nailgun",
        damage: 15,
        range: 40.0,
        fire_delay_ms: 100.0,
        kind: DamageKind::Projectile,
        fire_sound: "nailgun",
    },
    WeaponStats {
        name: "Launcher",
        damage: 120,
        range: 60.0,
        fire_delay_ms: 1500.0,
        kind: DamageKind::Aoe,
        fire_sound: "launcher",
    },
];

/// Индекс слота, гарантированно в 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub struct WeaponSlot(u8);

impl WeaponSlot {
    pub const KNUCKLES: Self = Self(0);
    pub const SHOTGUN: Self = Self(1);
    pub const NAILGUN: Self = Self(2);
    pub const LAUNCHER: Self = Self(3);

    /// None для индекса вне каталога
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < WEAPON_CATALOG.len()).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn stats(self) -> &'static WeaponStats {
        &WEAPON_CATALOG[self.0 as usize]
    }
}

/// Оружие игрока: активный слот + время последнего выстрела
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct WeaponLoadout {
    pub current: WeaponSlot,
    /// Monotonic timestamp (ms) последнего успешного выстрела
    pub last_fire_ms: Option<f64>,
}

impl WeaponLoadout {
    pub fn active(&self) -> &'static WeaponStats {
        self.current.stats()
    }

    /// Fire gate: прошло строго больше fire_delay с последнего выстрела
    pub fn can_fire(&self, now_ms: f64) -> bool {
        match self.last_fire_ms {
            None => true,
            Some(last) => now_ms - last > self.active().fire_delay_ms,
        }
    }

    /// Пытается выстрелить: при успехе обновляет timestamp и возвращает статы
    pub fn try_fire(&mut self, now_ms: f64) -> Option<&'static WeaponStats> {
        if !self.can_fire(now_ms) {
            return None;
        }
        self.last_fire_ms = Some(now_ms);
        Some(self.active())
    }

    /// Немедленная смена слота (timestamp выстрела не трогаем)
    pub fn select(&mut self, slot: WeaponSlot) -> bool {
        if self.current == slot {
            return false;
        }
        self.current = slot;
        true
    }
}

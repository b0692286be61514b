//! Player control marker component
//!
//! Отмечает единственный entity, которым управляет input (singleton на всю сессию).

use bevy::prelude::*;

use crate::combat::WeaponLoadout;
use crate::components::{DamageFlash, Kinematics, PlayerVitals};

/// Marker component для player-controlled entity
///
/// Required Components: vitals, kinematics, loadout, flash deadline.
/// `Transform.translation` = позиция глаз (камера first-person).
///
/// # Архитектурная заметка
/// - Enemy AI ищет цель через `With<Player>`
/// - Игрок никогда не despawn'ится (смерть = hp <= 0 + exit control)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(PlayerVitals, Kinematics, WeaponLoadout, DamageFlash, Transform)]
pub struct Player;

//! Input layer: host → simulation
//!
//! Host (окно/браузер/тестовый bot) раз в кадр перезаписывает `InputSnapshot`,
//! кладёт выбор оружия в `WeaponCommands` и обновляет `CameraPose` (mouse look).
//! Симуляция только читает snapshot, команды дренирует сама.

use std::collections::VecDeque;

use bevy::prelude::*;

/// Состояние клавиатуры/мыши на текущий кадр
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    /// Primary fire зажат (автоогонь ограничен только fire delay)
    pub fire: bool,
}

/// Команда от host, применяется в начале тика
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Hotkeys 1-4 → slot 0-3 (индекс сырой, валидируется при применении)
    SelectWeapon(u8),
}

/// FIFO очередь команд, дренируется один раз за тик
#[derive(Resource, Debug, Default)]
pub struct WeaponCommands {
    pending: VecDeque<PlayerCommand>,
}

impl WeaponCommands {
    pub fn push(&mut self, command: PlayerCommand) {
        self.pending.push_back(command);
    }

    /// Удобный helper для hotkey: digit 1..=4
    pub fn select_hotkey(&mut self, digit: u8) {
        self.push(PlayerCommand::SelectWeapon(digit.wrapping_sub(1)));
    }

    pub fn drain(&mut self) -> impl Iterator<Item = PlayerCommand> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Pointer-lock / active control
///
/// Пока `active == false` геймплей заморожен (HUD продолжает обновляться).
/// Host включает при захвате курсора; симуляция выключает при смерти игрока.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub active: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self { active: true }
    }
}

/// Run condition для геймплейных систем
pub fn control_active(control: Res<ControlState>) -> bool {
    control.active
}

/// Поза камеры (first-person, камера = глаза игрока)
///
/// - `forward`/`up` пишет host (mouse look)
/// - `position` пишет симуляция после kinematics
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

impl CameraPose {
    /// Направление взгляда для ray queries (fallback: -Z)
    pub fn view_direction(&self) -> Dir3 {
        Dir3::new(self.forward).unwrap_or(Dir3::NEG_Z)
    }

    /// Направить взгляд в точку (используется host'ом и тестами)
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.length_squared() > f32::EPSILON {
            self.forward = direction.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkeys_map_to_zero_based_slots() {
        let mut commands = WeaponCommands::default();
        commands.select_hotkey(1);
        commands.select_hotkey(4);
        commands.select_hotkey(0);

        let drained: Vec<_> = commands.drain().collect();
        assert_eq!(
            drained,
            vec![
                PlayerCommand::SelectWeapon(0),
                PlayerCommand::SelectWeapon(3),
                PlayerCommand::SelectWeapon(255),
            ]
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn test_view_direction_fallback() {
        let pose = CameraPose {
            forward: Vec3::ZERO,
            ..Default::default()
        };
        assert_eq!(pose.view_direction(), Dir3::NEG_Z);
    }

    #[test]
    fn test_look_at_normalizes() {
        let mut pose = CameraPose::default();
        pose.look_at(Vec3::new(10.0, 0.0, 0.0));
        assert!((pose.forward - Vec3::X).length() < 1e-6);
    }
}

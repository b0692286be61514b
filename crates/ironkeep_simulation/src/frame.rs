//! Frame schedule: один тик симуляции на отрисованный кадр
//!
//! # Архитектура
//!
//! **Update** → `drive_frame` (exclusive, читает `Time::delta`)
//!   └─ `step_frame(world, dt)` → FrameClock += dt → `FrameTick`
//!
//! FrameTick = цепочка фаз (`FrameSet`), строго последовательно, single-threaded:
//! Commands → Player → Environment → Weapons → Projectiles → Enemies → Feedback → Hud → Present
//!
//! Геймплейные фазы (Commands..=Enemies) работают только при `ControlState.active`.
//! Feedback, Hud и Present — всегда (HUD должен показать смерть, flash — откатиться).
//!
//! Тесты зовут `step_frame` напрямую с фиксированным dt (без `Time`).

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;

use crate::input::control_active;
use crate::logger;

/// Custom schedule: один игровой тик
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameTick;

/// Фазы тика (в порядке выполнения)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Дренаж очереди команд (смена оружия)
    Commands,
    /// Kinematics игрока + поза камеры
    Player,
    /// Secret wall trigger
    Environment,
    Weapons,
    Projectiles,
    Enemies,
    /// Откат damage flash
    Feedback,
    Hud,
    /// Flush в PresentationHost
    Present,
}

impl FrameSet {
    /// Фазы, замороженные пока control неактивен
    pub const GAMEPLAY: [FrameSet; 6] = [
        FrameSet::Commands,
        FrameSet::Player,
        FrameSet::Environment,
        FrameSet::Weapons,
        FrameSet::Projectiles,
        FrameSet::Enemies,
    ];
}

/// Монотонные часы симуляции
///
/// `now_ms` — источник времени для fire gate и flash deadline.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    pub now_ms: f64,
    pub delta_secs: f32,
    pub frame: u64,
}

impl FrameClock {
    pub fn advance(&mut self, dt: f32) {
        // Отрицательный/NaN dt не двигает часы назад
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta_secs = dt;
        self.now_ms += f64::from(dt) * 1000.0;
        self.frame = self.frame.wrapping_add(1);
    }
}

/// Один тик: продвинуть часы и прогнать `FrameTick`
pub fn step_frame(world: &mut World, dt: f32) {
    world
        .get_resource_or_insert_with(FrameClock::default)
        .advance(dt);

    if let Err(err) = world.try_run_schedule(FrameTick) {
        logger::log_error(&format!("FrameTick not registered: {err}"));
    }
}

/// System: Update → один FrameTick с реальным delta
///
/// Exclusive system (требует &mut World для run_schedule).
pub fn drive_frame(world: &mut World) {
    let Some(dt) = world.get_resource::<Time>().map(|time| time.delta_secs()) else {
        return;
    };
    step_frame(world, dt);
}

/// Регистрирует FrameTick schedule и порядок фаз
pub(crate) fn configure_frame_schedule(app: &mut App) {
    app.init_resource::<FrameClock>()
        .edit_schedule(FrameTick, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        })
        .configure_sets(
            FrameTick,
            (
                FrameSet::Commands,
                FrameSet::Player,
                FrameSet::Environment,
                FrameSet::Weapons,
                FrameSet::Projectiles,
                FrameSet::Enemies,
                FrameSet::Feedback,
                FrameSet::Hud,
                FrameSet::Present,
            )
                .chain(),
        );

    for set in FrameSet::GAMEPLAY {
        app.configure_sets(FrameTick, set.run_if(control_active));
    }

    app.add_systems(Update, drive_frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = FrameClock::default();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        clock.advance(0.25);

        assert_eq!(clock.now_ms, 750.0);
        assert_eq!(clock.frame, 4);
        assert_eq!(clock.delta_secs, 0.25);
    }

    #[derive(Resource, Default)]
    struct Trace(Vec<&'static str>);

    #[test]
    fn test_gameplay_sets_frozen_without_control() {
        let mut app = App::new();
        app.init_resource::<crate::input::ControlState>()
            .init_resource::<Trace>();
        configure_frame_schedule(&mut app);
        app.add_systems(
            FrameTick,
            (
                (|mut trace: ResMut<Trace>| trace.0.push("weapons")).in_set(FrameSet::Weapons),
                (|mut trace: ResMut<Trace>| trace.0.push("hud")).in_set(FrameSet::Hud),
            ),
        );

        step_frame(app.world_mut(), 0.5);
        app.world_mut().resource_mut::<crate::input::ControlState>().active = false;
        step_frame(app.world_mut(), 0.5);

        assert_eq!(app.world().resource::<Trace>().0, vec!["weapons", "hud", "hud"]);
        assert_eq!(app.world().resource::<FrameClock>().now_ms, 1000.0);
    }
}

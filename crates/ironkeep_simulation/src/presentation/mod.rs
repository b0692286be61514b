//! Presentation domain — simulation → host (scene graph, audio, HUD widgets)
//!
//! Симуляция НЕ владеет рендером. Весь вывод идёт в одну точку:
//! - lifecycle визуалов: `Added<VisualHandle>` / `Changed<Transform>` / `RemovedComponents`
//! - одноразовые эффекты: `PresentationEvent` (appearance, tint, sound, exit control)
//! - HUD: `HudSnapshot` каждый тик
//!
//! `flush_presentation` (последняя система тика) резолвит имена через `AssetLibrary`
//! и вызывает `PresentationHost`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assets::{names, SoundBuffer, TextureAsset};
use crate::combat::DamageKind;
use crate::hud::HudSnapshot;

mod hosts;
mod sync;

pub use hosts::{HeadlessHost, HostCall, RecordingHost};
pub use sync::flush_presentation;

/// RGB множитель поверх текстуры
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    /// Placeholder для незагруженной текстуры (magenta)
    pub const FALLBACK: Self = Self::rgb(1.0, 0.0, 1.0);
    /// Damage flash
    pub const DAMAGE: Self = Self::rgb(1.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Что за визуал host должен создать для entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum VisualKind {
    Wall { secret: bool },
    /// Billboard sprite
    Enemy,
    Projectile { kind: DamageKind },
}

impl VisualKind {
    /// Текстура при attach
    pub fn default_texture(self) -> &'static str {
        match self {
            VisualKind::Wall { secret: false } => names::WALL,
            VisualKind::Wall { secret: true } => names::SECRET_WALL,
            VisualKind::Enemy => names::ENEMY_IDLE,
            VisualKind::Projectile {
                kind: DamageKind::Aoe,
            } => names::ROCKET,
            VisualKind::Projectile { .. } => names::NAIL,
        }
    }
}

/// Entity имеет визуал на стороне host
///
/// Добавление → attach, удаление/despawn → detach.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct VisualHandle {
    pub kind: VisualKind,
}

impl VisualHandle {
    pub fn new(kind: VisualKind) -> Self {
        Self { kind }
    }
}

/// Одноразовые эффекты для host (порядок внутри тика сохраняется)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    /// Сменить текстуру визуала
    Appearance {
        entity: Entity,
        texture: &'static str,
    },
    /// None → вернуть исходный цвет
    Tint { entity: Entity, tint: Option<Tint> },
    Sound { name: &'static str },
    /// Выйти из pointer-lock (игрок мёртв). Шлётся каждый тик, без дедупликации
    ExitControl,
}

impl PresentationEvent {
    pub fn sound(name: &'static str) -> Self {
        Self::Sound { name }
    }
}

/// Внешний collaborator: scene graph + audio + HUD widgets
///
/// Все методы infallible с точки зрения симуляции: host сам решает, что делать с ошибками.
pub trait PresentationHost: Send + Sync {
    fn attach_visual(
        &mut self,
        entity: Entity,
        kind: VisualKind,
        transform: &Transform,
        texture: &TextureAsset,
    );

    fn detach_visual(&mut self, entity: Entity);

    fn sync_transform(&mut self, entity: Entity, transform: &Transform);

    fn set_appearance(&mut self, entity: Entity, name: &str, texture: &TextureAsset);

    fn set_tint(&mut self, entity: Entity, tint: Option<Tint>);

    /// Вызывается только для загруженных звуков
    fn play_sound(&mut self, name: &str, sound: &SoundBuffer);

    fn present_hud(&mut self, hud: &HudSnapshot, face: &TextureAsset);

    fn exit_control(&mut self);
}

/// Активный host
#[derive(Resource)]
pub struct Presentation(pub Box<dyn PresentationHost>);

impl Presentation {
    pub fn new(host: impl PresentationHost + 'static) -> Self {
        Self(Box::new(host))
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(HeadlessHost::default())
    }
}

/// Presentation Plugin
///
/// Регистрирует события и flush в конце тика (`FrameSet::Present`, работает всегда).
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PresentationEvent>()
            .init_resource::<Presentation>()
            .add_systems(
                crate::frame::FrameTick,
                flush_presentation.in_set(crate::frame::FrameSet::Present),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_textures() {
        assert_eq!(VisualKind::Enemy.default_texture(), "enemy_idle");
        assert_eq!(
            VisualKind::Wall { secret: true }.default_texture(),
            "secret_wall"
        );
        assert_eq!(
            VisualKind::Projectile {
                kind: DamageKind::Projectile
            }
            .default_texture(),
            "nail"
        );
        assert_eq!(
            VisualKind::Projectile {
                kind: DamageKind::Aoe
            }
            .default_texture(),
            "rocket"
        );
    }
}

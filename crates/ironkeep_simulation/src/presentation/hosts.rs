//! Встроенные hosts: headless (лог) и recording (тесты)

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::{PresentationHost, Tint, VisualKind};
use crate::assets::{SoundBuffer, TextureAsset};
use crate::hud::HudSnapshot;
use crate::logger;

/// Host без рендера: пишет вызовы в debug лог
///
/// HUD логируется только при изменении (иначе спам каждый тик).
#[derive(Debug, Default)]
pub struct HeadlessHost {
    last_hud: Option<HudSnapshot>,
    visuals: usize,
}

impl PresentationHost for HeadlessHost {
    fn attach_visual(
        &mut self,
        entity: Entity,
        kind: VisualKind,
        transform: &Transform,
        _texture: &TextureAsset,
    ) {
        self.visuals += 1;
        logger::log(&format!(
            "host: attach {:?} {:?} at {:?} ({} visuals)",
            entity, kind, transform.translation, self.visuals
        ));
    }

    fn detach_visual(&mut self, entity: Entity) {
        self.visuals = self.visuals.saturating_sub(1);
        logger::log(&format!(
            "host: detach {:?} ({} visuals)",
            entity, self.visuals
        ));
    }

    fn sync_transform(&mut self, _entity: Entity, _transform: &Transform) {}

    fn set_appearance(&mut self, entity: Entity, name: &str, texture: &TextureAsset) {
        logger::log(&format!(
            "host: {:?} appearance → {} (fallback: {})",
            entity,
            name,
            texture.is_fallback()
        ));
    }

    fn set_tint(&mut self, _entity: Entity, _tint: Option<Tint>) {}

    fn play_sound(&mut self, name: &str, sound: &SoundBuffer) {
        logger::log(&format!("host: play '{}' ({} bytes)", name, sound.bytes.len()));
    }

    fn present_hud(&mut self, hud: &HudSnapshot, _face: &TextureAsset) {
        if self.last_hud.as_ref() != Some(hud) {
            logger::log(&format!(
                "host: HUD hp={:.1} armor={} ammo='{}' face={:?}",
                hud.hp, hud.armor, hud.ammo, hud.face
            ));
            self.last_hud = Some(hud.clone());
        }
    }

    fn exit_control(&mut self) {
        logger::log("host: exit control");
    }
}

/// Один вызов host'а (для assertions в тестах)
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Attach {
        entity: Entity,
        kind: VisualKind,
        translation: Vec3,
    },
    Detach {
        entity: Entity,
    },
    SyncTransform {
        entity: Entity,
        translation: Vec3,
    },
    Appearance {
        entity: Entity,
        texture: String,
        fallback: bool,
    },
    Tint {
        entity: Entity,
        tint: Option<Tint>,
    },
    Sound {
        name: String,
    },
    Hud(HudSnapshot),
    ExitControl,
}

/// Host, который записывает все вызовы в общий буфер
///
/// Clone шарит буфер: один экземпляр уходит в `Presentation`, второй остаётся у теста.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingHost {
    fn record(&self, call: HostCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Забирает накопленные вызовы (буфер очищается)
    pub fn take(&self) -> Vec<HostCall> {
        self.calls
            .lock()
            .map(|mut calls| std::mem::take(&mut *calls))
            .unwrap_or_default()
    }

    pub fn sounds(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Sound { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn last_hud(&self) -> Option<HudSnapshot> {
        self.calls().into_iter().rev().find_map(|call| match call {
            HostCall::Hud(hud) => Some(hud),
            _ => None,
        })
    }

    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }
}

impl PresentationHost for RecordingHost {
    fn attach_visual(
        &mut self,
        entity: Entity,
        kind: VisualKind,
        transform: &Transform,
        _texture: &TextureAsset,
    ) {
        self.record(HostCall::Attach {
            entity,
            kind,
            translation: transform.translation,
        });
    }

    fn detach_visual(&mut self, entity: Entity) {
        self.record(HostCall::Detach { entity });
    }

    fn sync_transform(&mut self, entity: Entity, transform: &Transform) {
        self.record(HostCall::SyncTransform {
            entity,
            translation: transform.translation,
        });
    }

    fn set_appearance(&mut self, entity: Entity, name: &str, texture: &TextureAsset) {
        self.record(HostCall::Appearance {
            entity,
            texture: name.to_string(),
            fallback: texture.is_fallback(),
        });
    }

    fn set_tint(&mut self, entity: Entity, tint: Option<Tint>) {
        self.record(HostCall::Tint { entity, tint });
    }

    fn play_sound(&mut self, name: &str, _sound: &SoundBuffer) {
        self.record(HostCall::Sound {
            name: name.to_string(),
        });
    }

    fn present_hud(&mut self, hud: &HudSnapshot, _face: &TextureAsset) {
        self.record(HostCall::Hud(hud.clone()));
    }

    fn exit_control(&mut self) {
        self.record(HostCall::ExitControl);
    }
}

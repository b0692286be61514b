//! Flush: ECS state за тик → вызовы host'а

use bevy::prelude::*;

use super::{Presentation, PresentationEvent, VisualHandle};
use crate::assets::AssetLibrary;
use crate::hud::HudSnapshot;
use crate::logger;

/// Система: отдать host'у всё, что изменилось за тик
///
/// Порядок:
/// 1. attach новых визуалов / sync сдвинутых
/// 2. события в порядке записи (appearance, tint, sound, exit control)
/// 3. detach удалённых (после событий — kill sound уже отыгран)
/// 4. HUD
pub fn flush_presentation(
    mut presentation: ResMut<Presentation>,
    mut events: EventReader<PresentationEvent>,
    mut removed: RemovedComponents<VisualHandle>,
    visuals: Query<(Entity, Ref<VisualHandle>, Ref<Transform>)>,
    library: Res<AssetLibrary>,
    hud: Res<HudSnapshot>,
) {
    let host = presentation.0.as_mut();

    for (entity, handle, transform) in visuals.iter() {
        if handle.is_added() {
            let texture = library.texture(handle.kind.default_texture());
            host.attach_visual(entity, handle.kind, &transform, &texture);
        } else if transform.is_changed() {
            host.sync_transform(entity, &transform);
        }
    }

    for event in events.read() {
        match *event {
            PresentationEvent::Appearance { entity, texture } => {
                host.set_appearance(entity, texture, &library.texture(texture));
            }
            PresentationEvent::Tint { entity, tint } => host.set_tint(entity, tint),
            PresentationEvent::Sound { name } => match library.sound(name) {
                Some(sound) => host.play_sound(name, sound),
                None => logger::log(&format!("Sound '{}' not loaded, skipped", name)),
            },
            PresentationEvent::ExitControl => host.exit_control(),
        }
    }

    for entity in removed.read() {
        host.detach_visual(entity);
    }

    host.present_hud(&hud, &library.texture(hud.face.texture_name()));
}

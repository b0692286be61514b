//! Asset loading (textures + sounds), best-effort startup
//!
//! Flow:
//! 1. `AssetManifest` — список (name, path)
//! 2. `load_assets` — один task на ассет в `IoTaskPool`, затем join всех
//! 3. Каждая ошибка логируется и заменяется fallback'ом:
//!    - texture → `TextureAsset::Fallback` (сплошной цвет)
//!    - sound → отсутствует (play_sound станет no-op)
//!
//! Join никогда не падает: геймплей стартует с тем, что загрузилось.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, IoTaskPool, Task, TaskPool};
use serde::{Deserialize, Serialize};

use crate::presentation::Tint;

pub mod source;

pub use source::{AssetLoadError, AssetSource, FileAssetSource, MemoryAssetSource};

/// Имена ассетов, на которые ссылается симуляция
pub mod names {
    pub const WALL: &str = "wall";
    pub const SECRET_WALL: &str = "secret_wall";
    pub const ENEMY_IDLE: &str = "enemy_idle";
    pub const ENEMY_CHASE: &str = "enemy_chase";
    pub const NAIL: &str = "nail";
    pub const ROCKET: &str = "rocket";
    pub const FACE_HEALTHY: &str = "face_healthy";
    pub const FACE_HURT: &str = "face_hurt";
    pub const FACE_DEAD: &str = "face_dead";

    pub const SOUND_ENEMY_ALERT: &str = "enemy_alert";
    pub const SOUND_ENEMY_DEATH: &str = "enemy_death";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    pub path: String,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Что грузить на старте
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub textures: Vec<AssetEntry>,
    pub sounds: Vec<AssetEntry>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let textures = [
            names::WALL,
            names::SECRET_WALL,
            names::ENEMY_IDLE,
            names::ENEMY_CHASE,
            names::NAIL,
            names::ROCKET,
            names::FACE_HEALTHY,
            names::FACE_HURT,
            names::FACE_DEAD,
        ]
        .into_iter()
        .map(|name| AssetEntry::new(name, format!("textures/{name}.png")))
        .collect();

        let sounds = crate::combat::WEAPON_CATALOG
            .iter()
            .map(|weapon| weapon.fire_sound)
            .chain([names::SOUND_ENEMY_ALERT, names::SOUND_ENEMY_DEATH])
            .map(|name| AssetEntry::new(name, format!("sounds/{name}.ogg")))
            .collect();

        Self { textures, sounds }
    }
}

/// Загруженная текстура или placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum TextureAsset {
    Image { bytes: Arc<[u8]> },
    Fallback { tint: Tint },
}

impl TextureAsset {
    pub fn fallback() -> Self {
        Self::Fallback {
            tint: Tint::FALLBACK,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Декодированием занимается host, симуляция хранит байты как есть
#[derive(Debug, Clone, PartialEq)]
pub struct SoundBuffer {
    pub bytes: Arc<[u8]>,
}

/// Результат загрузки: lookup по имени
#[derive(Resource, Debug, Clone, Default)]
pub struct AssetLibrary {
    textures: HashMap<String, TextureAsset>,
    sounds: HashMap<String, SoundBuffer>,
}

impl AssetLibrary {
    /// Неизвестное имя → fallback (никогда не падает)
    pub fn texture(&self, name: &str) -> TextureAsset {
        self.textures
            .get(name)
            .cloned()
            .unwrap_or_else(TextureAsset::fallback)
    }

    /// None → звука нет, воспроизведение пропускается
    pub fn sound(&self, name: &str) -> Option<&SoundBuffer> {
        self.sounds.get(name)
    }

    pub fn insert_texture(&mut self, name: impl Into<String>, texture: TextureAsset) {
        self.textures.insert(name.into(), texture);
    }

    pub fn insert_sound(&mut self, name: impl Into<String>, sound: SoundBuffer) {
        self.sounds.insert(name.into(), sound);
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn sound_count(&self) -> usize {
        self.sounds.len()
    }

    pub fn fallback_count(&self) -> usize {
        self.textures.values().filter(|t| t.is_fallback()).count()
    }
}

type FetchTask = Task<Result<Vec<u8>, AssetLoadError>>;

fn spawn_fetches<S: AssetSource>(
    pool: &TaskPool,
    source: &Arc<S>,
    entries: &[AssetEntry],
) -> Vec<(String, FetchTask)> {
    entries
        .iter()
        .map(|entry| {
            let source = Arc::clone(source);
            let path = entry.path.clone();
            let task = pool.spawn(async move { source.fetch(&path).await });
            (entry.name.clone(), task)
        })
        .collect()
}

/// Грузит все ассеты manifest'а параллельно и ждёт завершения всех
///
/// Отмены нет: начатая загрузка всегда доходит до конца.
pub fn load_assets<S: AssetSource>(source: Arc<S>, manifest: &AssetManifest) -> AssetLibrary {
    let pool = IoTaskPool::get_or_init(TaskPool::new);

    let texture_tasks = spawn_fetches(pool, &source, &manifest.textures);
    let sound_tasks = spawn_fetches(pool, &source, &manifest.sounds);

    let library = block_on(async move {
        let mut library = AssetLibrary::default();

        for (name, task) in texture_tasks {
            let texture = match task.await {
                Ok(bytes) => TextureAsset::Image {
                    bytes: bytes.into(),
                },
                Err(err) => {
                    crate::logger::log_warning(&format!(
                        "Texture '{}' unavailable ({}), using fallback",
                        name, err
                    ));
                    TextureAsset::fallback()
                }
            };
            library.insert_texture(name, texture);
        }

        for (name, task) in sound_tasks {
            match task.await {
                Ok(bytes) => library.insert_sound(
                    name,
                    SoundBuffer {
                        bytes: bytes.into(),
                    },
                ),
                Err(err) => crate::logger::log_warning(&format!(
                    "Sound '{}' unavailable ({}), playback will be skipped",
                    name, err
                )),
            }
        }

        library
    });

    crate::logger::log_info(&format!(
        "Assets loaded: {} textures ({} fallback), {} sounds",
        library.texture_count(),
        library.fallback_count(),
        library.sound_count()
    ));

    library
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_manifest() -> AssetManifest {
        AssetManifest {
            textures: vec![
                AssetEntry::new(names::WALL, "wall.png"),
                AssetEntry::new(names::ENEMY_IDLE, "missing.png"),
            ],
            sounds: vec![
                AssetEntry::new("shotgun", "shotgun.ogg"),
                AssetEntry::new(names::SOUND_ENEMY_DEATH, "empty.ogg"),
            ],
        }
    }

    #[test]
    fn test_failed_fetches_fall_back() {
        let source = MemoryAssetSource::default()
            .with_file("wall.png", vec![1, 2, 3])
            .with_file("shotgun.ogg", vec![9])
            .with_file("empty.ogg", Vec::new());

        let library = load_assets(Arc::new(source), &tiny_manifest());

        assert!(!library.texture(names::WALL).is_fallback());
        assert!(library.texture(names::ENEMY_IDLE).is_fallback());
        assert_eq!(library.fallback_count(), 1);

        assert!(library.sound("shotgun").is_some());
        assert!(library.sound(names::SOUND_ENEMY_DEATH).is_none());
    }

    #[test]
    fn test_everything_missing_still_joins() {
        let library = load_assets(Arc::new(MemoryAssetSource::default()), &AssetManifest::default());

        assert_eq!(library.texture_count(), AssetManifest::default().textures.len());
        assert_eq!(library.fallback_count(), library.texture_count());
        assert_eq!(library.sound_count(), 0);
    }

    #[test]
    fn test_unknown_texture_is_fallback() {
        let library = AssetLibrary::default();
        assert_eq!(library.texture("nope"), TextureAsset::fallback());
    }

    #[test]
    fn test_default_manifest_covers_weapon_sounds() {
        let manifest = AssetManifest::default();
        for weapon in crate::combat::WEAPON_CATALOG.iter() {
            assert!(manifest.sounds.iter().any(|s| s.name == weapon.fire_sound));
        }
    }

    #[test]
    fn test_file_source_reports_not_found() {
        let source = FileAssetSource::new("/definitely/not/a/real/root");
        let err = block_on(source.fetch("wall.png")).unwrap_err();
        assert!(matches!(err, AssetLoadError::NotFound { .. }));
    }
}

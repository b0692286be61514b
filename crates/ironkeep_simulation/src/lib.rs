//! IRONKEEP Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: first-person arcade shooter без рендера.
//!
//! HOST BOUNDARY:
//! - ECS = gameplay (movement, AI, weapons, projectiles, secret wall, HUD projection)
//! - Host = рендер, звук, pointer lock, загрузка байтов (`PresentationHost`, `AssetSource`)
//!
//! Один тик = `FrameTick` schedule (см. `frame`), запускается из `Update`
//! или напрямую через `step_frame(world, dt)`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod assets;
pub mod combat;
pub mod components;
pub mod config;
pub mod frame;
pub mod hud;
pub mod input;
pub mod level;
pub mod logger;
pub mod player;
pub mod presentation;
pub mod session;

// Re-export базовых типов для удобства
pub use ai::{AIConfig, AIPlugin, AIState, Enemy, EnemyAlerted};
pub use assets::{load_assets, AssetLibrary, AssetManifest, FileAssetSource};
pub use combat::{
    CombatPlugin, DamageKind, EnemyKilled, Projectile, WeaponFired, WeaponLoadout, WeaponSlot,
    WeaponStats, WEAPON_CATALOG,
};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use frame::{step_frame, FrameClock, FrameSet, FrameTick};
pub use hud::{FaceState, HudPlugin, HudSnapshot};
pub use input::{CameraPose, ControlState, InputSnapshot, PlayerCommand, WeaponCommands};
pub use level::{build_level, LevelLayout, LevelPlugin, LevelSummary};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use player::PlayerPlugin;
pub use presentation::{
    HeadlessHost, HostCall, Presentation, PresentationEvent, PresentationHost, PresentationPlugin,
    RecordingHost,
};
pub use session::SessionStats;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Ресурсы только инициализируются (`init_resource`): config/presentation/assets,
/// вставленные до plugin'а, не перезаписываются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        frame::configure_frame_schedule(app);

        app.init_resource::<SimulationConfig>()
            .init_resource::<InputSnapshot>()
            .init_resource::<WeaponCommands>()
            .init_resource::<ControlState>()
            .init_resource::<CameraPose>()
            .init_resource::<AssetLibrary>()
            .init_resource::<SessionStats>();

        if !app.world().contains_resource::<DeterministicRng>() {
            // Детерминистичный RNG (seed по умолчанию)
            app.insert_resource(DeterministicRng::new(42));
        }

        // Подсистемы
        app.add_plugins((
            PresentationPlugin,
            PlayerPlugin,
            LevelPlugin,
            CombatPlugin,
            AIPlugin,
            HudPlugin,
        ))
        .add_systems(
            FrameTick,
            session::tally_session_stats.in_set(FrameSet::Hud),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Без `SimulationPlugin`: вызывающий сначала вставляет свои ресурсы
/// (config, `Presentation`, `AssetLibrary`), потом добавляет plugin.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

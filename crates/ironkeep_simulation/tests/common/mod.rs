//! Общий test harness: headless App + RecordingHost + фиксированный dt

#![allow(dead_code)]

use std::sync::Arc;

use bevy::prelude::*;
use ironkeep_simulation::ai::enemy_bundle;
use ironkeep_simulation::assets::MemoryAssetSource;
use ironkeep_simulation::player::player_bundle;
use ironkeep_simulation::*;

/// Все ассеты default manifest'а "загружены" (звуки реально доходят до host)
pub fn full_library() -> AssetLibrary {
    let manifest = AssetManifest::default();
    let source = manifest
        .textures
        .iter()
        .chain(manifest.sounds.iter())
        .fold(MemoryAssetSource::default(), |source, entry| {
            source.with_file(entry.path.clone(), vec![0u8; 4])
        });
    load_assets(Arc::new(source), &manifest)
}

pub struct Harness {
    pub app: App,
    pub host: RecordingHost,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_library(full_library())
    }

    pub fn with_library(library: AssetLibrary) -> Self {
        let host = RecordingHost::default();
        let mut app = create_headless_app(42);
        app.insert_resource(Presentation::new(host.clone()))
            .insert_resource(library)
            .add_plugins(SimulationPlugin);
        Self { app, host }
    }

    pub fn world(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn step(&mut self, dt: f32) {
        step_frame(self.app.world_mut(), dt);
    }

    pub fn steps(&mut self, count: usize, dt: f32) {
        for _ in 0..count {
            self.step(dt);
        }
    }

    /// Игрок на высоте глаз в точке (x, z)
    pub fn spawn_player(&mut self, x: f32, z: f32) -> Entity {
        let config = self.world().resource::<SimulationConfig>().clone();
        let eye = Vec3::new(x, config.movement.eye_height, z);
        self.world().resource_mut::<CameraPose>().position = eye;
        self.world().spawn(player_bundle(eye, &config.player)).id()
    }

    /// Враг на высоте глаз (туда смотрит прицел по умолчанию)
    pub fn spawn_enemy(&mut self, x: f32, z: f32) -> Entity {
        let config = self.world().resource::<SimulationConfig>().clone();
        let position = Vec3::new(x, config.movement.eye_height, z);
        self.world().spawn(enemy_bundle(position, &config.enemy)).id()
    }

    pub fn set_fire(&mut self, fire: bool) {
        self.world().resource_mut::<InputSnapshot>().fire = fire;
    }

    pub fn look(&mut self, forward: Vec3) {
        self.world().resource_mut::<CameraPose>().forward = forward;
    }

    pub fn select_hotkey(&mut self, digit: u8) {
        self.world()
            .resource_mut::<WeaponCommands>()
            .select_hotkey(digit);
    }

    pub fn enemy_hp(&mut self, enemy: Entity) -> Option<i32> {
        self.world().get::<Health>(enemy).map(|health| health.current)
    }

    pub fn is_alive(&mut self, entity: Entity) -> bool {
        self.world().get_entity(entity).is_ok()
    }

    pub fn projectile_count(&mut self) -> usize {
        let world = self.world();
        world.query::<&Projectile>().iter(world).count()
    }

    pub fn sound_count(&self, name: &str) -> usize {
        self.host.sounds().iter().filter(|sound| *sound == name).count()
    }
}

//! Headless симуляция IRONKEEP
//!
//! Загружает config + ассеты, строит арену и гоняет seeded "бота" N кадров.
//! Одинаковые аргументы → одинаковый прогон (ChaCha8 + фиксированный dt).
//!
//! Usage:
//!   cargo run -p ironkeep_simulation -- --seed 7 --frames 1200 --assets ./assets

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use rand::Rng;

use ironkeep_simulation::frame::drive_frame;
use ironkeep_simulation::logger::{self, LogLevel};
use ironkeep_simulation::{
    build_level, create_headless_app, load_assets, AIState, AssetLibrary, AssetManifest,
    CameraPose, DeterministicRng, FileAssetSource, HudSnapshot, InputSnapshot, LevelLayout,
    Player, PlayerVitals, SecretWall, SessionStats, SimulationConfig, SimulationPlugin,
    WeaponCommands,
};

#[derive(Parser, Debug)]
#[command(name = "ironkeep_simulation")]
#[command(about = "Run the IRONKEEP simulation headless with a seeded input bot")]
struct Args {
    /// Seed для бота (DeterministicRng)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Сколько кадров прогнать
    #[arg(long, default_value_t = 1200)]
    frames: u32,

    /// Фиксированный шаг кадра (секунды)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON с tuning (частичный JSON допустим)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Корень ассетов (textures/, sounds/); без него — только fallback'и
    #[arg(long)]
    assets: Option<PathBuf>,

    /// ASCII файл уровня вместо встроенной арены
    #[arg(long)]
    level: Option<PathBuf>,

    /// debug | info | warn | error
    #[arg(long, default_value = "info")]
    log_level: String,

    /// HUD snapshot в лог каждые N кадров (0 — выключено)
    #[arg(long, default_value_t = 120)]
    report_every: u32,
}

/// Состояние бота между кадрами
#[derive(Resource, Debug, Default)]
struct BotState {
    yaw: f32,
}

/// System: seeded "игрок" — ходит, крутит камеру, стреляет, меняет оружие
fn bot_input(
    mut rng: ResMut<DeterministicRng>,
    mut bot: ResMut<BotState>,
    mut input: ResMut<InputSnapshot>,
    mut camera: ResMut<CameraPose>,
    mut weapons: ResMut<WeaponCommands>,
) {
    let rng = &mut rng.rng;

    if rng.gen_bool(0.05) {
        bot.yaw += rng.gen_range(-1.0_f32..1.0);
    }
    camera.forward = Vec3::new(-bot.yaw.sin(), 0.0, -bot.yaw.cos());

    *input = InputSnapshot {
        forward: rng.gen_bool(0.6),
        back: rng.gen_bool(0.05),
        left: rng.gen_bool(0.1),
        right: rng.gen_bool(0.1),
        sprint: rng.gen_bool(0.2),
        jump: rng.gen_bool(0.02),
        fire: rng.gen_bool(0.3),
    };

    if rng.gen_bool(0.01) {
        weapons.select_hotkey(rng.gen_range(1..=4_u8));
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_logger();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_error(&format!("❌ Startup failed: {err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let Some(level) = LogLevel::parse(&args.log_level) else {
        bail!("unknown log level '{}'", args.log_level);
    };
    logger::set_log_level(level);

    if args.dt.is_nan() || args.dt <= 0.0 {
        bail!("--dt must be positive, got {}", args.dt);
    }

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let layout = match &args.level {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading level {}", path.display()))?;
            LevelLayout::from_text(&text, 4.0, 4.0)
                .with_context(|| format!("parsing level {}", path.display()))?
        }
        None => LevelLayout::arena(),
    };

    let library = match &args.assets {
        Some(root) => load_assets(
            Arc::new(FileAssetSource::new(root)),
            &AssetManifest::default(),
        ),
        None => {
            logger::log_info("No --assets given, running with fallback textures and no sound");
            AssetLibrary::default()
        }
    };

    logger::log_info(&format!(
        "Starting IRONKEEP headless simulation (seed: {}, frames: {}, dt: {:.4})",
        args.seed, args.frames, args.dt
    ));

    let mut app = create_headless_app(args.seed);
    app.insert_resource(config.clone())
        .insert_resource(library)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            args.dt,
        )))
        .init_resource::<BotState>()
        .add_plugins(SimulationPlugin)
        .add_systems(Update, bot_input.before(drive_frame));

    let summary = build_level(app.world_mut(), &layout, &config);

    for frame in 0..args.frames {
        app.update();

        if args.report_every > 0 && frame % args.report_every == 0 {
            let hud = app.world().resource::<HudSnapshot>();
            logger::log_info(&format!(
                "Frame {}: {}",
                frame,
                serde_json::to_string(hud).context("serializing HUD snapshot")?
            ));
        }
    }

    let world = app.world_mut();
    let stats = world.resource::<SessionStats>().clone();
    let hp = world
        .query_filtered::<&PlayerVitals, With<Player>>()
        .single(world)
        .map(|vitals| vitals.hp)
        .unwrap_or_default();
    let (alive, chasing) = world
        .query::<&AIState>()
        .iter(world)
        .fold((0, 0), |(alive, chasing), state| {
            (alive + 1, chasing + usize::from(state.is_chasing()))
        });
    let secret_offset = summary
        .secret
        .and_then(|entity| {
            let secret = world.get::<SecretWall>(entity)?;
            let transform = world.get::<Transform>(entity)?;
            Some(secret.offset(transform))
        })
        .unwrap_or_default();

    logger::log_info(&format!(
        "Simulation complete: {} frames, player hp {:.1}, enemies {}/{} alive ({} chasing), \
         shots {}, kills {}, secret offset {:.1}",
        args.frames,
        hp,
        alive,
        summary.enemies.len(),
        chasing,
        stats.shots,
        stats.kills,
        secret_offset
    ));

    Ok(())
}

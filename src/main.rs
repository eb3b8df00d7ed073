//! Dwarf Brawl headless simulator.
//!
//! Runs the game's actor logic without a window:
//! - **bevy_ecs** for the entity-component-system architecture
//! - **configparser** for gameplay tuning (`config.ini`)
//! - **serde_json** for scripted input and state dumps
//!
//! # Main Loop
//!
//! 1. Load the configuration (defaults when the file is missing)
//! 2. Build the cell scene: the dwarf, its axe and hands, and the captains
//! 3. For every frame: feed the scripted input sample, advance time, run the
//!    schedule
//! 4. Stop early if the dwarf dies, then report (or dump) its final state
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600 --script demos/dodge.json --dump-state
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use dwarfbrawl::components::actorstate::ActorState;
use dwarfbrawl::components::mapposition::MapPosition;
use dwarfbrawl::components::stats::Stats;
use dwarfbrawl::game;
use dwarfbrawl::resources::gameconfig::GameConfig;
use dwarfbrawl::resources::input::RawInput;
use dwarfbrawl::resources::inputscript::InputScript;
use dwarfbrawl::resources::worldtime::WorldTime;

/// Dwarf Brawl headless simulator
#[derive(Parser)]
#[command(version, about = "Runs the Dwarf Brawl actor logic without a window.")]
struct Cli {
    /// Configuration file with gameplay tuning.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// JSON input script; without one the dwarf stands still.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Seed for enemy placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of captains in the cell.
    #[arg(long, default_value_t = 2)]
    captains: usize,

    /// Print the dwarf's final state as JSON.
    #[arg(long)]
    dump_state: bool,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlayerSnapshot<'a> {
    frame: u64,
    elapsed: f32,
    position: Vec2,
    stats: &'a Stats,
    state: &'a ActorState,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using default tuning", e);
    }

    // Early-exit: write the configuration and quit
    if let Some(path) = cli.write_config {
        config.config_path = path;
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    if cli.fps <= 0.0 {
        eprintln!("Error: --fps must be positive");
        std::process::exit(2);
    }

    let script = match &cli.script {
        Some(path) => match InputScript::load_from_file(path) {
            Ok(script) => script,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => InputScript::default(),
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::setup_world(&mut world, config);
    let scene = game::spawn_cell_scene(&mut world, cli.captains, cli.seed);

    let mut update = match game::build_schedule(&mut world) {
        Ok(schedule) => schedule,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // --------------- Main loop ---------------
    let dt = 1.0 / cli.fps;
    for frame in 0..cli.frames {
        script.apply(frame, &mut world.resource_mut::<RawInput>());
        game::run_frame(&mut world, &mut update, dt);

        if world.get_entity(scene.player).is_err() {
            log::info!("The dwarf died on frame {}", frame);
            break;
        }
    }

    let time = *world.resource::<WorldTime>();
    let snapshot = match (
        world.get::<ActorState>(scene.player),
        world.get::<Stats>(scene.player),
        world.get::<MapPosition>(scene.player),
    ) {
        (Some(state), Some(stats), Some(position)) => Some(PlayerSnapshot {
            frame: time.frame_count,
            elapsed: time.elapsed,
            position: position.pos,
            stats,
            state,
        }),
        _ => None,
    };

    let captains_alive = scene
        .captains
        .iter()
        .filter(|c| world.get_entity(**c).is_ok())
        .count();
    log::info!(
        "Simulated {} frame(s), {:.2}s; {} captain(s) left",
        time.frame_count,
        time.elapsed,
        captains_alive
    );

    if cli.dump_state {
        match snapshot {
            Some(snapshot) => match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            },
            None => println!("null"),
        }
    }
}

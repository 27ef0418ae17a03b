#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Snake experience.
//!
//! The binary owns the single engine instance and threads it through the
//! backend's update closure each frame: inputs become commands, accumulated
//! wall-clock time becomes a burst of steps, and queries repopulate the scene
//! the backend draws.

mod settings;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gridsnake_core::{CollisionKind, Command, EngineConfig, Event, RoundStatus};
use gridsnake_rendering::{palette, GridPresentation, Presentation, RenderingBackend, Scene};
use gridsnake_rendering_macroquad::MacroquadBackend;
use gridsnake_system_pacing::Pacing;
use gridsnake_world::{self as world, query, RandomSource, World};
use settings::Settings;

const WINDOW_TITLE: &str = "Grid Snake";
const DEFAULT_CELL_SIZE: f32 = 20.0;

/// Command-line options for the Grid Snake shell.
#[derive(Debug, Parser)]
#[command(
    name = "gridsnake",
    about = "Grid-based snake round driven by a fixed-interval simulation"
)]
struct Args {
    /// Path to an optional TOML settings file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of grid columns.
    #[arg(long)]
    columns: Option<u32>,
    /// Number of grid rows.
    #[arg(long)]
    rows: Option<u32>,
    /// Side length of one cell in pixels.
    #[arg(long)]
    cell_size: Option<f32>,
    /// Seed for food placement; derived from OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Grid Snake command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;
    let config = engine_config(&args, &settings);
    let cell_size = args
        .cell_size
        .or(settings.cell_size)
        .unwrap_or(DEFAULT_CELL_SIZE);

    let rng = match args.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    };
    let mut world = World::new(config, rng).context("invalid engine configuration")?;

    let grid = GridPresentation::new(query::grid_size(&world), cell_size);
    let mut scene = Scene::new(grid);
    populate_scene(&world, &mut scene);
    let presentation = Presentation {
        window_title: WINDOW_TITLE.to_string(),
        clear_color: palette::BACKGROUND,
        scene,
    };

    let mut pacing = Pacing::new();
    let mut events: Vec<Event> = Vec::new();
    let backend = MacroquadBackend::default().with_show_fps(args.show_fps);

    backend.run(presentation, move |frame_dt, frame_input, scene| {
        events.clear();

        if let Some(direction) = frame_input.direction {
            world::apply(
                &mut world,
                Command::RequestDirection { direction },
                &mut events,
            );
        }
        if frame_input.toggle_pause {
            match query::status(&world) {
                RoundStatus::Running => world::apply(&mut world, Command::Pause, &mut events),
                RoundStatus::Paused => world::apply(&mut world, Command::Resume, &mut events),
                RoundStatus::Ended => {}
            }
        }
        if frame_input.restart {
            world::apply(&mut world, Command::Restart, &mut events);
        }

        // Fixed-interval accumulator: the interval is re-read after every
        // step so a mid-burst speed-up shortens the remaining drains, and a
        // terminal step stops the burst immediately.
        pacing.observe(query::status(&world), frame_dt);
        while query::status(&world) == RoundStatus::Running
            && pacing.consume(query::move_interval(&world))
        {
            world::apply(&mut world, Command::Step, &mut events);
        }

        for event in &events {
            if let Event::RoundEnded { cause } = event {
                println!("{}", round_summary(*cause, query::score(&world)));
            }
        }

        populate_scene(&world, scene);
    })
}

fn engine_config(args: &Args, settings: &Settings) -> EngineConfig {
    let defaults = EngineConfig::default();
    EngineConfig {
        columns: args
            .columns
            .or(settings.columns)
            .unwrap_or(defaults.columns),
        rows: args.rows.or(settings.rows).unwrap_or(defaults.rows),
        initial_snake_length: settings
            .initial_snake_length
            .unwrap_or(defaults.initial_snake_length),
        initial_move_interval: settings
            .move_interval_seconds
            .map(seconds_to_duration)
            .unwrap_or(defaults.initial_move_interval),
        food_reward: settings.food_reward.unwrap_or(defaults.food_reward),
        speedup_milestone: settings
            .speedup_milestone
            .unwrap_or(defaults.speedup_milestone),
        speedup_factor: settings.speedup_factor.unwrap_or(defaults.speedup_factor),
        min_move_interval: settings
            .min_move_interval_seconds
            .map(seconds_to_duration)
            .unwrap_or(defaults.min_move_interval),
    }
}

/// Negative values collapse to zero and are then rejected by validation.
fn seconds_to_duration(seconds: f32) -> Duration {
    Duration::from_secs_f32(seconds.max(0.0))
}

fn populate_scene(world: &World, scene: &mut Scene) {
    scene.snake = query::snake(world).into_vec();
    scene.food = query::food_position(world);
    scene.score = query::score(world);
    scene.status = query::status(world);
}

fn round_summary(cause: CollisionKind, score: u32) -> String {
    let reason = match cause {
        CollisionKind::Wall => "hit the wall",
        CollisionKind::SelfBody => "ran into itself",
    };
    format!("Round over: the snake {reason}. Final score {score}.")
}

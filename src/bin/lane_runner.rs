//! Headless Lane Runner
//!
//! Plays a mirrored skirmish between North and South and prints a summary.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use lane_siege::core::error::Result;
use lane_siege::core::types::Side;
use lane_siege::core::LaneConfig;
use lane_siege::lane::{LaneWorld, StatTable, UnitKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Headless Lane Runner - mirrored skirmish with seeded waves
#[derive(Parser, Debug)]
#[command(name = "lane_runner")]
#[command(about = "Run a mirrored lane skirmish and print the outcome")]
struct Args {
    /// Maximum ticks before calling a draw
    #[arg(long, default_value_t = 6000)]
    ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Lane config TOML (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Unit stat table TOML (built-in stats when omitted)
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Debug-level simulation logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Ticks between waves
const WAVE_INTERVAL: u64 = 100;
/// Mobs per side in each wave
const WAVE_SIZE: usize = 3;

#[derive(Serialize, Default)]
struct SideSummary {
    mobs: usize,
    buildings: usize,
    hidden_rogues: usize,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    winner: String,
    ticks: u64,
    seed: u64,
    attacks: usize,
    deaths: usize,
    north: SideSummary,
    south: SideSummary,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "lane_siege=debug"
    } else {
        "lane_siege=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => LaneConfig::load(path)?,
        None => LaneConfig::default(),
    };
    let stats = match &args.stats {
        Some(path) => StatTable::load(path)?,
        None => StatTable::with_defaults(),
    };

    let mut world = LaneWorld::new(config.clone()).with_waypoints(lane_waypoints(&config));
    spawn_defenses(&mut world, &stats, &config);
    tracing::info!(
        "Skirmish on {}x{} grid, seed {}, up to {} ticks",
        config.grid_width,
        config.grid_height,
        seed,
        args.ticks
    );

    let mut attacks = 0;
    let mut deaths = 0;
    while world.winner().is_none() && world.current_tick < args.ticks {
        if world.current_tick % WAVE_INTERVAL == 0 {
            spawn_wave(&mut world, &stats, &config, &mut rng);
        }

        let report = world.tick(config.tick_seconds);
        attacks += report.attacks.len();
        deaths += report.deaths.len();
    }

    let winner = world.winner();
    match winner {
        Some(side) => tracing::info!("{} wins after {} ticks", side.as_str(), world.current_tick),
        None => tracing::warn!("No winner after {} ticks", world.current_tick),
    }

    let summary = RunSummary {
        winner: winner.map_or("draw", |side| side.as_str()).to_string(),
        ticks: world.current_tick,
        seed,
        attacks,
        deaths,
        north: summarize(&world, Side::North),
        south: summarize(&world, Side::South),
    };

    match args.format.as_str() {
        "text" => print_text(&summary),
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        other => {
            tracing::warn!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Central lane plus two flanks, each running from home band to home band
fn lane_waypoints(config: &LaneConfig) -> Vec<Vec2> {
    let width = config.grid_width;
    let height = config.grid_height;
    let columns = [width * 0.25, width * 0.5, width * 0.75];
    let rows = [0.1, 0.25, 0.375, 0.5, 0.625, 0.75, 0.9];

    columns
        .iter()
        .flat_map(|&x| rows.iter().map(move |&r| Vec2::new(x, height * r)))
        .collect()
}

/// North's spot for `position`, or its mirror image for South
fn mirrored(position: Vec2, side: Side, config: &LaneConfig) -> Vec2 {
    match side {
        Side::North => position,
        Side::South => Vec2::new(position.x, config.grid_height - position.y),
    }
}

fn spawn_defenses(world: &mut LaneWorld, stats: &StatTable, config: &LaneConfig) {
    let width = config.grid_width;
    for side in [Side::North, Side::South] {
        world.spawn(
            stats.for_kind(UnitKind::Base),
            mirrored(Vec2::new(width * 0.5, 2.0), side, config),
            side,
        );
        for x in [width * 0.25, width * 0.75] {
            world.spawn(
                stats.for_kind(UnitKind::Tower),
                mirrored(Vec2::new(x, 6.0), side, config),
                side,
            );
        }
    }
}

/// Same random draw for both sides, mirrored across the midline
fn spawn_wave(world: &mut LaneWorld, stats: &StatTable, config: &LaneConfig, rng: &mut ChaCha8Rng) {
    let width = config.grid_width;
    for _ in 0..WAVE_SIZE {
        let kind = UnitKind::MOBS[rng.gen_range(0..UnitKind::MOBS.len())];
        let spot = Vec2::new(rng.gen_range(width * 0.2..width * 0.8), rng.gen_range(4.0..5.0));
        for side in [Side::North, Side::South] {
            world.spawn(stats.for_kind(kind), mirrored(spot, side, config), side);
        }
        tracing::debug!("Wave at tick {}: {:?} at {:?}", world.current_tick, kind, spot);
    }
}

fn summarize(world: &LaneWorld, side: Side) -> SideSummary {
    world
        .live_units(side)
        .fold(SideSummary::default(), |mut summary, unit| {
            if unit.is_mob() {
                summary.mobs += 1;
            } else {
                summary.buildings += 1;
            }
            if unit.kind() == UnitKind::Rogue && unit.is_hidden() {
                summary.hidden_rogues += 1;
            }
            summary
        })
}

fn print_text(summary: &RunSummary) {
    println!("Lane Result");
    println!("===========");
    println!("Winner: {}", summary.winner);
    println!("Ticks: {}", summary.ticks);
    println!("Attacks: {}, deaths: {}", summary.attacks, summary.deaths);
    println!();
    for (name, side) in [("North", &summary.north), ("South", &summary.south)] {
        println!(
            "{}: {} mobs, {} buildings, {} hidden rogues",
            name, side.mobs, side.buildings, side.hidden_rogues
        );
    }
    println!();
    println!("Seed: {}", summary.seed);
}

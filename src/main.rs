//! # Duskhold Demo Entry Point
//!
//! Headless demonstration of the engine: generates a seeded random pillar
//! map, resolves one click-to-path query, and tick-simulates an actor
//! walking the result.

use clap::Parser;
use duskhold::{
    Actor, ActorState, Grid, GridConfig, PathEndpoint, PillarSeed, Point, Rect, StatBlock,
};
use log::{info, warn, LevelFilter};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Command line arguments for the Duskhold demo.
#[derive(Parser, Debug)]
#[command(name = "duskhold")]
#[command(about = "Isometric grid pathfinding and actor behavior demo")]
#[command(version)]
struct Args {
    /// Random seed for wall placement
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Grid rows
    #[arg(long, default_value_t = 12)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 12)]
    columns: usize,

    /// Fraction of cells carrying an impassable pillar
    #[arg(long, default_value_t = 0.25)]
    walls: f64,

    /// Start cell as row,column
    #[arg(long, default_value = "0,0")]
    start: String,

    /// Target cell as row,column
    #[arg(long, default_value = "11,11")]
    target: String,

    /// Print the computed path as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> duskhold::DuskholdResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Duskhold demo v{}", duskhold::VERSION);

    let start = parse_cell(&args.start)?;
    let target = parse_cell(&args.target)?;

    let config = GridConfig::new(args.rows, args.columns);
    let seeds = generate_pillars(&config, args.seed, args.walls, &[start, target]);
    let mut grid = Grid::headless(config, &seeds)?;

    let start_center = grid.element_center(
        grid.element_at(start.0, start.1)
            .ok_or_else(|| duskhold::DuskholdError::InvalidGrid("start cell out of range".into()))?,
    );
    let target_center = grid.element_center(
        grid.element_at(target.0, target.1)
            .ok_or_else(|| duskhold::DuskholdError::InvalidGrid("target cell out of range".into()))?,
    );

    info!(
        "querying path from {start:?} at {start_center:?} to {target:?} at {target_center:?}"
    );
    let path = grid.construct_path(
        PathEndpoint::Feet(start_center),
        PathEndpoint::Feet(target_center),
    )?;

    if path.is_empty() {
        warn!("no passable route with this seed; try another --seed or lower --walls");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&path)?);
    } else {
        for (index, step) in path.steps().iter().enumerate() {
            println!("step {index:2}: {:16} {:7.2}px", step.direction.name(), step.distance);
        }
        println!("total: {:.2}px over {} steps", path.total_distance(), path.steps().len());
    }

    // Walk it.
    let mut actor = Actor::new(start_center, StatBlock::new(100, 50));
    actor.follow_path(path, false);
    let mut ticks = 0u32;
    while actor.state() == ActorState::Walking && ticks < 100_000 {
        actor.update_time_dependent_states();
        ticks += 1;
    }
    info!(
        "actor arrived at {:?} facing {} after {ticks} ticks",
        actor.position(),
        actor.direction()
    );

    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Parses a "row,column" cell argument.
fn parse_cell(raw: &str) -> duskhold::DuskholdResult<(usize, usize)> {
    let mut parts = raw.splitn(2, ',');
    let row = parts.next().and_then(|p| p.trim().parse().ok());
    let column = parts.next().and_then(|p| p.trim().parse().ok());
    match (row, column) {
        (Some(r), Some(c)) => Ok((r, c)),
        _ => Err(duskhold::DuskholdError::InvalidGrid(format!(
            "expected row,column but got '{raw}'"
        ))),
    }
}

/// One pillar per cell, impassable with probability `walls` except for the
/// protected cells.
fn generate_pillars(
    config: &GridConfig,
    seed: u64,
    walls: f64,
    protected: &[(usize, usize)],
) -> Vec<PillarSeed> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half_w = config.cell_width / 2.0;
    let half_h = config.cell_height / 2.0;
    let mut seeds = Vec::with_capacity(config.rows * config.columns);
    for row in 0..config.rows {
        for column in 0..config.columns {
            let center = config.cell_center(row, column);
            // Pillars are taller than their cell; only left/right/bottom
            // edges participate in grid matching.
            let bbox = Rect::new(
                center.x - half_w,
                center.y - half_h - 128.0,
                config.cell_width,
                config.cell_height + 128.0,
            );
            let passable =
                protected.contains(&(row, column)) || rng.gen::<f64>() >= walls.clamp(0.0, 1.0);
            seeds.push(PillarSeed::new(bbox, passable));
        }
    }
    seeds
}

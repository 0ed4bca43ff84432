//! # Scroll Simulation
//!
//! Headless run of the quadrant window over a walking population.
//!
//! Run with: cargo run --release --bin scroll_sim -- --frames 600 --things 500
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=scrollgrid_core=trace`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use scrollgrid::{ScrollSimulation, SimulationConfig};
use scrollgrid_core::GridConfig;
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "scroll_sim", about = "Drive a scrolling quadrant grid headlessly")]
struct Args {
    /// Grid configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Scroll distance per frame.
    #[arg(short, long, default_value_t = 4.0)]
    speed: f32,

    /// Number of things to spawn.
    #[arg(short, long, default_value_t = 200)]
    things: usize,

    /// Quadrant capacity per thing.
    #[arg(long, default_value_t = 4)]
    capacity: usize,

    /// Seed for spawn positions.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log frames that run over budget.
    #[arg(long)]
    timing: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let grid = match args.config.as_deref().map(GridConfig::load) {
        None => GridConfig::default(),
        Some(Ok(grid)) => grid,
        Some(Err(err)) => {
            tracing::error!("Failed to load grid config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let config = SimulationConfig {
        grid,
        scroll_speed: args.speed,
        things: args.things,
        max_quadrants: args.capacity,
        seed: args.seed,
        enable_timing_logs: args.timing,
        ..Default::default()
    };

    let mut sim = match ScrollSimulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            tracing::error!("Invalid simulation setup: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                         SCROLL SIMULATION                        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "Grid: {} cols x {} rows, cell {:.1} x {:.1}, trigger {:.1}",
        sim.grid().num_cols(),
        sim.grid().num_rows(),
        sim.grid().cell_width(),
        sim.grid().cell_height(),
        sim.grid().scroll_trigger()
    );
    println!(
        "Run:  {} frames, {} things, {:.1} units/frame",
        args.frames, args.things, args.speed
    );
    println!();

    sim.run(args.frames).print_summary();

    let stats = sim.grid().stats();
    println!();
    println!(
        "Surfaces: {} created, {} released, {} live",
        stats.surfaces_created,
        stats.surfaces_released,
        stats.live_surfaces()
    );

    ExitCode::SUCCESS
}

//! # Scroll Simulation
//!
//! One frame of the loop:
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ 1. SCROLL                                                        │
//! │    └─ Grid and things shift left by the scroll speed             │
//! │                                                                  │
//! │ 2. MOVE THINGS                                                   │
//! │    ├─ Each thing walks by its own velocity                       │
//! │    └─ Things left behind the window respawn on the right         │
//! │                                                                  │
//! │ 3. WINDOW                                                        │
//! │    └─ update_window recycles columns past the trigger            │
//! │                                                                  │
//! │ 4. MEMBERSHIP                                                    │
//! │    └─ determine_all rebuilds thing <-> quadrant sets             │
//! │                                                                  │
//! │ 5. PAINT                                                         │
//! │    └─ Changed quadrants are repainted, then flags cleared        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scrollgrid_core::{
    Bounds, CanvasFactory, GridConfig, GridError, GridResult, QuadrantGrid, Rgba, ThingId,
    ThingRecord,
};

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Frame time above which a slow frame is logged.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(33);

const EMPTY_COLOR: Rgba = Rgba::new(16, 16, 24, 255);
const OCCUPIED_COLOR: Rgba = Rgba::new(64, 160, 96, 255);

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Grid dimensions and tolerances.
    pub grid: GridConfig,
    /// Horizontal scroll per frame, in world units.
    pub scroll_speed: f32,
    /// Number of things to spawn.
    pub things: usize,
    /// Quadrant capacity of each thing.
    pub max_quadrants: usize,
    /// Edge length of each thing's square bounding box.
    pub thing_size: f32,
    /// Largest per-axis walking speed of a thing, per frame.
    pub walker_speed: f32,
    /// Seed for spawn positions and velocities.
    pub seed: u64,
    /// Log frames that exceed [`MAX_FRAME_TIME`].
    pub enable_timing_logs: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            scroll_speed: 4.0,
            things: 200,
            max_quadrants: 4,
            thing_size: 24.0,
            walker_speed: 2.0,
            seed: 42,
            enable_timing_logs: false,
        }
    }
}

impl SimulationConfig {
    /// Checks the grid settings and the simulation parameters.
    ///
    /// # Errors
    ///
    /// Returns the grid's validation error, or [`GridError::InvalidConfig`]
    /// for a negative or non-finite speed, a non-positive thing size or a
    /// zero capacity.
    pub fn validate(&self) -> GridResult<()> {
        self.grid.validate()?;

        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "scroll speed must be finite and non-negative, got {}",
                self.scroll_speed
            )));
        }
        if !self.walker_speed.is_finite() || self.walker_speed < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "walker speed must be finite and non-negative, got {}",
                self.walker_speed
            )));
        }
        if !self.thing_size.is_finite() || self.thing_size <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "thing size must be positive, got {}",
                self.thing_size
            )));
        }
        if self.max_quadrants == 0 {
            return Err(GridError::InvalidConfig(
                "things need a capacity of at least one quadrant".to_string(),
            ));
        }
        Ok(())
    }
}

/// Timing and counters for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Window update time in microseconds.
    pub window_us: u64,
    /// Membership pass time in microseconds.
    pub membership_us: u64,
    /// Repaint time in microseconds.
    pub paint_us: u64,
    /// Columns recycled this frame.
    pub recycled: usize,
    /// Quadrants repainted this frame.
    pub dirty: usize,
    /// Thing/quadrant assignments made.
    pub assignments: u32,
    /// Things whose scan stopped at capacity.
    pub truncated: u32,
    /// Things respawned on the right edge.
    pub respawned: u32,
}

/// Accumulated statistics over a run.
#[derive(Clone, Debug)]
pub struct SimulationSummary {
    /// Frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded [`TARGET_FRAME_TIME`].
    pub frames_over_budget: u64,
    /// Columns recycled.
    pub columns_recycled: u64,
    /// Quadrants repainted.
    pub quadrants_repainted: u64,
    /// Truncated thing scans.
    pub truncated_things: u64,
    /// Thing respawns.
    pub respawns: u64,
}

impl SimulationSummary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            columns_recycled: 0,
            quadrants_repainted: 0,
            truncated_things: 0,
            respawns: 0,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        if stats.total_us > micros(TARGET_FRAME_TIME) {
            self.frames_over_budget += 1;
        }
        self.columns_recycled += stats.recycled as u64;
        self.quadrants_repainted += stats.dirty as u64;
        self.truncated_things += u64::from(stats.truncated);
        self.respawns += u64::from(stats.respawned);
    }

    /// Average frame time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Average quadrants repainted per frame.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_dirty(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.quadrants_repainted as f64 / self.frames_recorded as f64
    }

    /// Prints a summary of the run.
    #[allow(clippy::cast_precision_loss)]
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════════╗");
        println!("║                   SCROLL SIMULATION SUMMARY                      ║");
        println!("╚══════════════════════════════════════════════════════════════════╝");
        println!();
        println!("┌─ TIMING ───────────────────────────────────────────────────────┐");
        println!("│ Frames Recorded:    {}", self.frames_recorded);
        println!("│ Average Frame:      {:.3} ms", self.avg_frame_ms());
        if self.frames_recorded > 0 {
            println!("│ Min Frame:          {:.3} ms", self.min_frame_us as f64 / 1000.0);
            println!("│ Max Frame:          {:.3} ms", self.max_frame_us as f64 / 1000.0);
        }
        println!("│ Over Budget:        {} frames", self.frames_over_budget);
        println!("└──────────────────────────────────────────────────────────────────┘");
        println!();
        println!("┌─ WINDOW ───────────────────────────────────────────────────────┐");
        println!("│ Columns Recycled:   {}", self.columns_recycled);
        println!("│ Repainted:          {} ({:.1}/frame)", self.quadrants_repainted, self.avg_dirty());
        println!("│ Truncated Scans:    {}", self.truncated_things);
        println!("│ Respawns:           {}", self.respawns);
        println!("└──────────────────────────────────────────────────────────────────┘");
    }
}

impl Default for SimulationSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a quadrant grid over a population of walking things.
pub struct ScrollSimulation {
    grid: QuadrantGrid<CanvasFactory>,
    things: Vec<ThingRecord>,
    velocities: Vec<(f32, f32)>,
    rng: StdRng,
    config: SimulationConfig,
    frame: u64,
    summary: SimulationSummary,
}

impl ScrollSimulation {
    /// Builds the grid and spawns the population.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SimulationConfig) -> GridResult<Self> {
        config.validate()?;
        let grid = QuadrantGrid::from_config(&config.grid, CanvasFactory::new())?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut things = Vec::with_capacity(config.things);
        let mut velocities = Vec::with_capacity(config.things);
        for index in (0u32..).take(config.things) {
            let x = rng.gen_range(0.0..config.grid.screen_width);
            let y = spawn_height(&mut rng, &config);
            let bounds = Bounds::from_pos_size((x, y), (config.thing_size, config.thing_size));
            things.push(ThingRecord::new(
                ThingId::new(index, 0),
                bounds,
                config.max_quadrants,
            ));
            velocities.push(random_velocity(&mut rng, config.walker_speed));
        }

        tracing::info!(
            "Scroll simulation ready: {} things over {} quadrants, seed {}",
            things.len(),
            grid.num_quadrants(),
            config.seed
        );

        Ok(Self {
            grid,
            things,
            velocities,
            rng,
            config,
            frame: 0,
            summary: SimulationSummary::new(),
        })
    }

    /// Advances one frame.
    pub fn step(&mut self) -> FrameStats {
        let frame_start = Instant::now();
        let dx = self.config.scroll_speed;

        self.grid.translate(-dx);
        let respawned = self.move_things(dx);

        let window_start = Instant::now();
        let recycled = self.grid.update_window(dx);
        let window_us = micros(window_start.elapsed());

        let membership_start = Instant::now();
        let pass = self.grid.determine_all(&mut [&mut self.things[..]]);
        let membership_us = micros(membership_start.elapsed());

        let paint_start = Instant::now();
        let dirty = self.repaint();
        let paint_us = micros(paint_start.elapsed());

        let stats = FrameStats {
            frame: self.frame,
            total_us: micros(frame_start.elapsed()),
            window_us,
            membership_us,
            paint_us,
            recycled,
            dirty,
            assignments: pass.assignments,
            truncated: pass.truncated,
            respawned,
        };

        self.summary.record(stats);
        if self.config.enable_timing_logs && stats.total_us > micros(MAX_FRAME_TIME) {
            tracing::warn!(
                "Frame {} exceeded budget: {}us (target: {}us)",
                self.frame,
                stats.total_us,
                micros(TARGET_FRAME_TIME)
            );
        }
        tracing::trace!(
            "Frame {}: {} recycled, {} repainted, {} truncated",
            self.frame,
            recycled,
            dirty,
            pass.truncated
        );

        self.frame += 1;
        stats
    }

    /// Runs `frames` frames and returns the accumulated summary.
    pub fn run(&mut self, frames: u64) -> &SimulationSummary {
        for _ in 0..frames {
            self.step();
        }
        &self.summary
    }

    /// Walks every thing and respawns the ones left behind the window.
    fn move_things(&mut self, scroll: f32) -> u32 {
        let window_left = self
            .grid
            .leftmost()
            .map_or(-self.grid.cell_width(), |q| q.left());
        let screen_height = self.config.grid.screen_height;
        let mut respawned = 0;

        for (thing, velocity) in self.things.iter_mut().zip(&mut self.velocities) {
            thing.translate(velocity.0 - scroll, velocity.1);

            let bounds = thing.bounds;
            if bounds.top < 0.0 || bounds.bottom > screen_height {
                velocity.1 = -velocity.1;
            }

            if bounds.right < window_left {
                let x = self.config.grid.screen_width
                    + self.rng.gen_range(0.0..=self.grid.cell_width());
                let y = spawn_height(&mut self.rng, &self.config);
                let size = self.config.thing_size;
                thing.id = ThingId::new(thing.id.index(), thing.id.generation().wrapping_add(1));
                thing.move_to(Bounds::from_pos_size((x, y), (size, size)));
                *velocity = random_velocity(&mut self.rng, self.config.walker_speed);
                respawned += 1;
            }
        }
        respawned
    }

    /// Repaints changed quadrants and consumes every redraw flag.
    fn repaint(&mut self) -> usize {
        for quadrant in self.grid.quadrants_mut() {
            if !quadrant.is_changed() {
                continue;
            }
            let color = if quadrant.num_things() == 0 {
                EMPTY_COLOR
            } else {
                OCCUPIED_COLOR
            };
            quadrant.surface_mut().context().fill(color);
        }
        for thing in &mut self.things {
            thing.changed = false;
        }
        self.grid.clear_changed()
    }

    /// The grid being driven.
    #[must_use]
    pub fn grid(&self) -> &QuadrantGrid<CanvasFactory> {
        &self.grid
    }

    /// The population.
    #[must_use]
    pub fn things(&self) -> &[ThingRecord] {
        &self.things
    }

    /// Frames stepped so far.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Statistics accumulated so far.
    #[must_use]
    pub fn summary(&self) -> &SimulationSummary {
        &self.summary
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn spawn_height(rng: &mut StdRng, config: &SimulationConfig) -> f32 {
    let span = (config.grid.screen_height - config.thing_size).max(1.0);
    rng.gen_range(0.0..span)
}

fn random_velocity(rng: &mut StdRng, speed: f32) -> (f32, f32) {
    (rng.gen_range(-speed..=speed), rng.gen_range(-speed..=speed))
}

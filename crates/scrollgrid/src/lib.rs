//! # SCROLLGRID
//!
//! Frame orchestration on top of [`scrollgrid_core`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     SCROLL SIMULATION                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  scroll ──> move things ──> update_window ──> determine_all  │
//! │                                                   │          │
//! │                         repaint changed quadrants <┘         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `simulation`: Frame loop, population and timing

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod simulation;

pub use scrollgrid_core as core;

pub use simulation::{FrameStats, ScrollSimulation, SimulationConfig, SimulationSummary};

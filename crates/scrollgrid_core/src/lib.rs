//! # SCROLLGRID Core
//!
//! Spatial partitioning for a horizontally scrolling 2D world:
//! - A fixed-size grid of quadrants covering the viewport plus a margin
//! - A sliding window that recycles columns as the world scrolls
//! - Per-frame membership of things in quadrants, with redraw flags
//!
//! ## Frame Flow
//!
//! ```text
//! update_window(dx) ──> recycle columns past the trigger ──> shift hook
//!        │
//! determine_all(things) ──> thing <-> quadrant membership ──> dirty flags
//!        │
//! renderer ──> changed_quadrants() ──> clear_changed()
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use scrollgrid_core::{GridConfig, HeadlessSurfaces, QuadrantGrid};
//!
//! let mut grid = QuadrantGrid::from_config(&GridConfig::default(), HeadlessSurfaces::new())?;
//!
//! grid.update_window(scroll_dx);
//! grid.determine_all(&mut [&mut players[..], &mut enemies[..]]);
//! for quadrant in grid.changed_quadrants() {
//!     // redraw
//! }
//! grid.clear_changed();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bounds;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod membership;
pub mod quadrant;
pub mod stats;
pub mod surface;
pub mod sync;
pub mod thing;
mod window;

pub use bounds::Bounds;
pub use config::GridConfig;
pub use error::{GridError, GridResult};
pub use grid::{ColumnShift, QuadrantGrid, ShiftHook};
pub use layout::GridLayout;
pub use membership::Coverage;
pub use quadrant::{Column, ColumnId, Quadrant, QuadrantId};
pub use stats::{GridStats, PassStats};
pub use surface::{Canvas, CanvasContext, CanvasFactory, HeadlessSurfaces, Rgba, SurfaceFactory};
pub use sync::SharedGrid;
pub use thing::{Occupancy, Thing, ThingId, ThingRecord};

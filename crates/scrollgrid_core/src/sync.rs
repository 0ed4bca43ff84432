//! # Shared Grid Access
//!
//! The grid is single-threaded: window shifts rewrite the flat quadrant
//! list that membership passes iterate. When more than one thread drives or
//! reads a grid, every operation must hold one lock around the whole grid.
//! [`SharedGrid`] is that lock.
//!
//! ```rust,ignore
//! let shared = SharedGrid::new(grid);
//! let render_side = shared.clone();
//!
//! shared.with(|grid| {
//!     grid.update_window(dx);
//!     grid.determine_all(&mut [&mut things[..]]);
//! });
//! let dirty = render_side.with(|grid| grid.clear_changed());
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::grid::QuadrantGrid;
use crate::surface::SurfaceFactory;

/// A grid behind a single whole-grid mutex.
pub struct SharedGrid<F: SurfaceFactory> {
    inner: Arc<Mutex<QuadrantGrid<F>>>,
}

impl<F: SurfaceFactory> SharedGrid<F> {
    /// Wraps a grid.
    #[must_use]
    pub fn new(grid: QuadrantGrid<F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(grid)),
        }
    }

    /// Locks the grid until the guard is dropped.
    pub fn lock(&self) -> MutexGuard<'_, QuadrantGrid<F>> {
        self.inner.lock()
    }

    /// Runs `f` with the grid locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut QuadrantGrid<F>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Runs `f` only if the grid is not locked elsewhere.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut QuadrantGrid<F>) -> R) -> Option<R> {
        self.inner.try_lock().map(|mut grid| f(&mut grid))
    }

    /// Number of handles sharing this grid.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<F: SurfaceFactory> Clone for SharedGrid<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

//! # Window Manager
//!
//! Slides the quadrant window to the right as the world scrolls:
//!
//! ```text
//! before:  [C0][C1][C2][C3][C4][C5]      C0.left <= trigger
//! shift:       [C1][C2][C3][C4][C5]      C0's surfaces released
//! add:         [C1][C2][C3][C4][C5][C6]  C6.left = C5.right
//! ```
//!
//! Each shift moves the leftmost edge one cell width to the right, so the
//! recycling loop always ends. A large scroll delta (a dropped frame, a
//! teleport) is absorbed by looping, not by growing the window.

use crate::grid::{ColumnShift, QuadrantGrid};
use crate::layout::snap;
use crate::quadrant::{Column, ColumnId, Quadrant, QuadrantId};
use crate::surface::{SurfaceFactory, QUADRANT_SURFACE_SIZE};

impl<F: SurfaceFactory> QuadrantGrid<F> {
    /// Discards every quadrant and rebuilds the window with its first
    /// column two cells left of the viewport origin.
    ///
    /// Surfaces of the discarded quadrants are released before new ones are
    /// created. IDs keep counting; they are never reused.
    pub fn reset_all(&mut self) {
        for quadrant in self.quadrants.drain(..) {
            self.factory.release_surface(quadrant.into_surface());
            self.stats.surfaces_released += 1;
        }
        self.columns.clear();

        for index in 0..self.layout.num_cols() {
            let left = self.layout.initial_column_left(index);
            self.add_column(left);
        }

        self.out_difference = self.layout.cell_width();
        self.translate_residue = 0.0;
        self.stats.resets += 1;

        tracing::debug!(
            "Quadrant window reset: {} columns x {} rows, cell {}x{}",
            self.layout.num_cols(),
            self.layout.num_rows(),
            self.layout.cell_width(),
            self.layout.cell_height()
        );
        debug_assert!(self.is_consistent());
    }

    /// Adds the scroll delta to the offset counter and recycles columns
    /// while the leftmost quadrant is at or beyond the scroll trigger.
    ///
    /// The shift hook fires once per recycled column.
    ///
    /// # Returns
    ///
    /// The number of columns recycled.
    pub fn update_window(&mut self, scroll_delta: f32) -> usize {
        self.out_difference += scroll_delta;

        let trigger = self.layout.scroll_trigger();
        let mut recycled = 0;

        while let Some(leftmost) = self.leftmost().map(Quadrant::left) {
            if leftmost > trigger {
                break;
            }
            let Some(removed) = self.shift_column() else {
                break;
            };
            let anchor = self.rightmost().map_or(removed.right(), Quadrant::right);
            let added = self.add_column(anchor);
            recycled += 1;
            self.stats.columns_recycled += 1;

            tracing::trace!(
                "Recycled column {} at {} into column {} at {}",
                removed.id().raw(),
                removed.left(),
                added.raw(),
                anchor
            );

            if let Some(hook) = self.on_shift.as_mut() {
                hook(&ColumnShift {
                    removed: removed.id(),
                    removed_left: removed.left(),
                    added,
                    added_left: anchor,
                });
            }

            // Guards against f32 positions so large that a cell width no
            // longer moves them.
            if self.leftmost().map_or(true, |q| q.left() <= leftmost) {
                tracing::warn!(
                    "Quadrant window stopped advancing at x={}; recycling halted",
                    leftmost
                );
                break;
            }
        }

        if recycled > self.layout.num_cols() {
            tracing::warn!(
                "Scroll of {} recycled {} columns in one update (window holds {})",
                scroll_delta,
                recycled,
                self.layout.num_cols()
            );
        }
        debug_assert!(self.is_consistent());
        recycled
    }

    /// Moves every quadrant horizontally by `dx` without resizing it.
    ///
    /// Hosts that keep the world in screen coordinates call this with the
    /// negated scroll distance, then [`QuadrantGrid::update_window`].
    ///
    /// The window moves in whole lattice steps (see [`crate::layout`]). The
    /// part of `dx` below one step is carried into the next call, so many
    /// small moves add up to the same distance as one large move.
    pub fn translate(&mut self, dx: f32) {
        let wanted = self.translate_residue + dx;
        let step = snap(wanted);
        self.translate_residue = wanted - step;
        if step == 0.0 {
            return;
        }

        for quadrant in &mut self.quadrants {
            quadrant.translate(step);
        }
        for column in &mut self.columns {
            column.translate(step);
        }
    }

    /// Appends a column whose left edge is `left`.
    fn add_column(&mut self, left: f32) -> ColumnId {
        let id = ColumnId::from_raw(self.next_column);
        self.next_column += 1;

        let (width, height) = QUADRANT_SURFACE_SIZE;
        let size = self.layout.cell_size();
        for row in 0..self.layout.num_rows() {
            let origin = (left, self.layout.row_top(row));
            let surface = self.factory.create_surface(width, height);
            let quadrant_id = QuadrantId::from_raw(self.next_quadrant);
            self.next_quadrant += 1;

            self.quadrants
                .push(Quadrant::new(quadrant_id, id, row, origin, size, surface));
        }
        self.stats.surfaces_created += self.layout.num_rows() as u64;

        self.columns
            .push_back(Column::new(id, left, self.layout.cell_width()));
        self.stats.columns_created += 1;
        id
    }

    /// Removes the leftmost column and releases its surfaces.
    fn shift_column(&mut self) -> Option<Column> {
        let column = self.columns.pop_front()?;
        let rows = self.layout.num_rows().min(self.quadrants.len());

        for quadrant in self.quadrants.drain(..rows) {
            self.factory.release_surface(quadrant.into_surface());
            self.stats.surfaces_released += 1;
        }

        self.out_difference = self.layout.cell_width();
        Some(column)
    }
}

//! # Grid Layout
//!
//! Derives cell geometry from the viewport and the row/column counts.
//!
//! The grid is deliberately larger than the viewport:
//!
//! ```text
//!          col 0    col 1    col 2 ...            col n-1
//!        ┌────────┬────────┬────────────────────┬────────┐
//! row 0  │        │        │   (above viewport) │        │
//!        ├────────┼────────╔════════════════════╗────────┤
//! row 1  │        │        ║                    ║        │
//!  ...   │ margin │ margin ║      viewport      ║ margin │
//!        ├────────┼────────╚════════════════════╝────────┤
//! row m-1│        │        │   (below viewport) │        │
//!        └────────┴────────┴────────────────────┴────────┘
//!                          x = 0
//! ```
//!
//! Three columns and two rows are margin, so the viewport spans
//! `num_cols - 3` cells horizontally and `num_rows - 2` cells vertically.
//! Columns start two cells left of the viewport and rows one cell above it.
//!
//! Cell sizes are rounded up to a multiple of `1 / POSITION_RESOLUTION` and
//! the window only ever moves by such multiples. Every edge then lies on the
//! same binary lattice, where `f32` addition and subtraction are exact for
//! coordinates below `2^15`: a quadrant's `right - left` is always exactly
//! the cell width.

use crate::bounds::Bounds;
use crate::config::GridConfig;
use crate::error::{GridError, GridResult};

/// Columns not covered by the viewport.
pub const MARGIN_COLUMNS: usize = 3;

/// Rows not covered by the viewport.
pub const MARGIN_ROWS: usize = 2;

/// Columns placed left of the viewport origin at reset.
pub const LEADING_COLUMNS: usize = 2;

/// Rows placed above the viewport origin.
pub const LEADING_ROWS: usize = 1;

/// Smallest row count that leaves at least one visible row.
pub const MIN_ROWS: usize = MARGIN_ROWS + 1;

/// Smallest column count that leaves at least one visible column.
pub const MIN_COLUMNS: usize = MARGIN_COLUMNS + 1;

/// Lattice steps per world unit for cell sizes and window movement.
pub const POSITION_RESOLUTION: f32 = 256.0;

/// Rounds `value` up to the position lattice.
#[must_use]
pub fn snap_up(value: f32) -> f32 {
    (value * POSITION_RESOLUTION).ceil() / POSITION_RESOLUTION
}

/// Rounds `value` to the nearest lattice point.
#[must_use]
pub fn snap(value: f32) -> f32 {
    (value * POSITION_RESOLUTION).round() / POSITION_RESOLUTION
}

/// Immutable grid geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    screen_width: f32,
    screen_height: f32,
    num_rows: usize,
    num_cols: usize,
    cell_width: f32,
    cell_height: f32,
    tolerance: f32,
    scroll_trigger: f32,
}

impl GridLayout {
    /// Computes the layout for a viewport and grid size, with zero
    /// tolerance and the default scroll trigger.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidRows`] if `num_rows < 3`,
    /// [`GridError::InvalidColumns`] if `num_cols < 4` and
    /// [`GridError::InvalidViewport`] if either dimension is not finite and
    /// positive.
    pub fn new(
        screen_width: f32,
        screen_height: f32,
        num_rows: usize,
        num_cols: usize,
    ) -> GridResult<Self> {
        if num_rows < MIN_ROWS {
            return Err(GridError::InvalidRows {
                rows: num_rows,
                min: MIN_ROWS,
            });
        }
        if num_cols < MIN_COLUMNS {
            return Err(GridError::InvalidColumns {
                columns: num_cols,
                min: MIN_COLUMNS,
            });
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(screen_width) || !valid(screen_height) {
            return Err(GridError::InvalidViewport {
                width: screen_width,
                height: screen_height,
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let cell_width = snap_up(screen_width / (num_cols - MARGIN_COLUMNS) as f32);
        #[allow(clippy::cast_precision_loss)]
        let cell_height = snap_up(screen_height / (num_rows - MARGIN_ROWS) as f32);

        Ok(Self {
            screen_width,
            screen_height,
            num_rows,
            num_cols,
            cell_width,
            cell_height,
            tolerance: 0.0,
            scroll_trigger: cell_width * -2.0,
        })
    }

    /// Computes the layout described by a configuration.
    ///
    /// # Errors
    ///
    /// Returns the first precondition `config` violates.
    pub fn from_config(config: &GridConfig) -> GridResult<Self> {
        let mut layout = Self::new(
            config.screen_width,
            config.screen_height,
            config.num_rows,
            config.num_cols,
        )?
        .with_tolerance(config.tolerance)?;
        if let Some(trigger) = config.scroll_trigger {
            layout = layout.with_scroll_trigger(trigger)?;
        }
        Ok(layout)
    }

    /// Sets the overlap tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] if `tolerance` is negative or not
    /// finite.
    pub fn with_tolerance(mut self, tolerance: f32) -> GridResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {tolerance}"
            )));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Sets the scroll trigger.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] if `trigger` is not finite.
    pub fn with_scroll_trigger(mut self, trigger: f32) -> GridResult<Self> {
        if !trigger.is_finite() {
            return Err(GridError::InvalidConfig(format!(
                "scroll trigger must be finite, got {trigger}"
            )));
        }
        self.scroll_trigger = trigger;
        Ok(self)
    }

    /// Viewport width.
    #[inline]
    #[must_use]
    pub const fn screen_width(&self) -> f32 {
        self.screen_width
    }

    /// Viewport height.
    #[inline]
    #[must_use]
    pub const fn screen_height(&self) -> f32 {
        self.screen_height
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Total quadrants in the window.
    #[inline]
    #[must_use]
    pub const fn num_quadrants(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Width of one cell.
    #[inline]
    #[must_use]
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one cell.
    #[inline]
    #[must_use]
    pub const fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Overlap tolerance.
    #[inline]
    #[must_use]
    pub const fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Scroll trigger offset.
    #[inline]
    #[must_use]
    pub const fn scroll_trigger(&self) -> f32 {
        self.scroll_trigger
    }

    /// Left edge of the column at `index` right after a reset.
    #[must_use]
    pub fn initial_column_left(&self, index: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let offset = index as f32 - LEADING_COLUMNS as f32;
        offset * self.cell_width
    }

    /// Top edge of `row`.
    #[must_use]
    pub fn row_top(&self, row: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let offset = row as f32 - LEADING_ROWS as f32;
        offset * self.cell_height
    }

    /// Cell width and height.
    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> (f32, f32) {
        (self.cell_width, self.cell_height)
    }

    /// Bounds of the cell at `row` in the column whose left edge is `left`.
    #[must_use]
    pub fn cell_bounds(&self, left: f32, row: usize) -> Bounds {
        let top = self.row_top(row);
        Bounds::new(left, top, left + self.cell_width, top + self.cell_height)
    }
}

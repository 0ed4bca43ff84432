//! # Quadrant Grid
//!
//! The grid owns two synchronized views of the same quadrants:
//!
//! ```text
//! columns:   [ C0 ][ C1 ][ C2 ] ... [ Cn-1 ]          (left to right)
//! quadrants: [C0r0 C0r1 .. C0rm][C1r0 .. C1rm] ...    (flat, column after column)
//! ```
//!
//! The flat list is always the concatenation of the columns. Only the
//! window operations (`reset_all`, `update_window`, `translate`) change
//! either view, so callers can read both but never reshape them.
//!
//! Quadrant IDs are handed out in creation order and removed only from the
//! front, so the flat list is sorted by ID with no gaps. Looking a quadrant
//! up by ID is a subtraction.

use std::collections::VecDeque;
use std::fmt;

use crate::config::GridConfig;
use crate::error::GridResult;
use crate::layout::GridLayout;
use crate::quadrant::{Column, ColumnId, Quadrant, QuadrantId};
use crate::stats::GridStats;
use crate::surface::SurfaceFactory;

/// Describes one column recycling event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnShift {
    /// Column removed from the left edge.
    pub removed: ColumnId,
    /// Left edge of the removed column.
    pub removed_left: f32,
    /// Column appended on the right edge.
    pub added: ColumnId,
    /// Left edge of the appended column.
    pub added_left: f32,
}

/// Callback invoked once per recycled column.
pub type ShiftHook = Box<dyn FnMut(&ColumnShift) + Send>;

/// A sliding window of quadrants over a horizontally scrolling world.
pub struct QuadrantGrid<F: SurfaceFactory> {
    pub(crate) layout: GridLayout,
    pub(crate) factory: F,
    pub(crate) quadrants: Vec<Quadrant<F::Surface>>,
    pub(crate) columns: VecDeque<Column>,
    pub(crate) next_quadrant: u64,
    pub(crate) next_column: u64,
    pub(crate) out_difference: f32,
    pub(crate) translate_residue: f32,
    pub(crate) on_shift: Option<ShiftHook>,
    pub(crate) stats: GridStats,
}

impl<F: SurfaceFactory> QuadrantGrid<F> {
    /// Creates a grid and fills its window.
    #[must_use]
    pub fn new(layout: GridLayout, factory: F) -> Self {
        let mut grid = Self {
            layout,
            factory,
            quadrants: Vec::with_capacity(layout.num_quadrants()),
            columns: VecDeque::with_capacity(layout.num_cols()),
            next_quadrant: 0,
            next_column: 0,
            out_difference: layout.cell_width(),
            translate_residue: 0.0,
            on_shift: None,
            stats: GridStats::default(),
        };
        grid.reset_all();
        grid
    }

    /// Creates a grid from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the first precondition `config` violates.
    pub fn from_config(config: &GridConfig, factory: F) -> GridResult<Self> {
        Ok(Self::new(GridLayout::from_config(config)?, factory))
    }

    /// Installs a callback fired once per recycled column.
    #[must_use]
    pub fn with_shift_hook(mut self, hook: impl FnMut(&ColumnShift) + Send + 'static) -> Self {
        self.on_shift = Some(Box::new(hook));
        self
    }

    /// Replaces or removes the shift callback.
    pub fn set_shift_hook(&mut self, hook: Option<ShiftHook>) {
        self.on_shift = hook;
    }

    /// Grid geometry.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// All quadrants, column after column.
    #[inline]
    #[must_use]
    pub fn quadrants(&self) -> &[Quadrant<F::Surface>] {
        &self.quadrants
    }

    /// Mutable access to each quadrant's flags and surface.
    pub fn quadrants_mut(&mut self) -> impl Iterator<Item = &mut Quadrant<F::Surface>> {
        self.quadrants.iter_mut()
    }

    /// Number of quadrants.
    #[inline]
    #[must_use]
    pub fn num_quadrants(&self) -> usize {
        self.quadrants.len()
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.layout.num_rows()
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn num_cols(&self) -> usize {
        self.layout.num_cols()
    }

    /// Width of one quadrant.
    #[inline]
    #[must_use]
    pub const fn cell_width(&self) -> f32 {
        self.layout.cell_width()
    }

    /// Height of one quadrant.
    #[inline]
    #[must_use]
    pub const fn cell_height(&self) -> f32 {
        self.layout.cell_height()
    }

    /// Leftmost-quadrant position that triggers recycling.
    #[inline]
    #[must_use]
    pub const fn scroll_trigger(&self) -> f32 {
        self.layout.scroll_trigger()
    }

    /// Overlap tolerance.
    #[inline]
    #[must_use]
    pub const fn tolerance(&self) -> f32 {
        self.layout.tolerance()
    }

    /// Scroll accumulated since the last recycle, starting from one cell
    /// width.
    #[inline]
    #[must_use]
    pub const fn out_difference(&self) -> f32 {
        self.out_difference
    }

    /// Columns, left to right.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.iter()
    }

    /// Column at `index`, counted from the left.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Quadrants of the column at `index`, top to bottom.
    #[must_use]
    pub fn column_quadrants(&self, index: usize) -> Option<&[Quadrant<F::Surface>]> {
        let rows = self.layout.num_rows();
        let start = index.checked_mul(rows)?;
        let end = start.checked_add(rows)?;
        self.quadrants.get(start..end)
    }

    /// First quadrant of the first column.
    #[must_use]
    pub fn leftmost(&self) -> Option<&Quadrant<F::Surface>> {
        self.quadrants.first()
    }

    /// Most recently created quadrant: the bottom of the last column.
    #[must_use]
    pub fn rightmost(&self) -> Option<&Quadrant<F::Surface>> {
        self.quadrants.last()
    }

    /// Quadrant with `id`, if it is still in the window.
    #[must_use]
    pub fn quadrant(&self, id: QuadrantId) -> Option<&Quadrant<F::Surface>> {
        self.quadrants.get(self.index_of(id)?)
    }

    /// Mutable quadrant with `id`, if it is still in the window.
    pub fn quadrant_mut(&mut self, id: QuadrantId) -> Option<&mut Quadrant<F::Surface>> {
        let index = self.index_of(id)?;
        self.quadrants.get_mut(index)
    }

    /// Quadrants flagged for redraw.
    pub fn changed_quadrants(&self) -> impl Iterator<Item = &Quadrant<F::Surface>> + '_ {
        self.quadrants.iter().filter(|q| q.is_changed())
    }

    /// Clears every redraw flag. Returns how many were set.
    pub fn clear_changed(&mut self) -> usize {
        let mut cleared = 0;
        for quadrant in self.quadrants.iter_mut().filter(|q| q.is_changed()) {
            quadrant.mark_clean();
            cleared += 1;
        }
        cleared
    }

    /// Lifetime counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &GridStats {
        &self.stats
    }

    /// The surface factory.
    #[inline]
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Checks that the flat list is the concatenation of the columns, that
    /// columns are ordered left to right, that IDs are contiguous and that
    /// every quadrant has the layout's cell size at its row's height.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let rows = self.layout.num_rows();
        if self.columns.len() != self.layout.num_cols()
            || self.quadrants.len() != self.layout.num_quadrants()
        {
            return false;
        }

        let ordered = self
            .columns
            .iter()
            .zip(self.columns.iter().skip(1))
            .all(|(a, b)| a.left() < b.left());

        let contiguous = self
            .quadrants
            .windows(2)
            .all(|pair| pair[0].id().raw() + 1 == pair[1].id().raw());

        let (cell_width, cell_height) = self.layout.cell_size();
        let members_match = self
            .columns
            .iter()
            .zip(self.quadrants.chunks(rows))
            .all(|(column, quadrants)| {
                column.width() == cell_width
                    && quadrants.iter().enumerate().all(|(row, q)| {
                        q.column() == column.id()
                            && q.row() == row
                            && q.left() == column.left()
                            && q.top() == self.layout.row_top(row)
                            && q.width() == cell_width
                            && q.height() == cell_height
                    })
            });

        ordered && contiguous && members_match
    }

    pub(crate) fn index_of(&self, id: QuadrantId) -> Option<usize> {
        let first = self.quadrants.first()?.id().raw();
        let offset = usize::try_from(id.raw().checked_sub(first)?).ok()?;
        (offset < self.quadrants.len()).then_some(offset)
    }
}

impl<F: SurfaceFactory> fmt::Debug for QuadrantGrid<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadrantGrid")
            .field("layout", &self.layout)
            .field("columns", &self.columns)
            .field("quadrants", &self.quadrants.len())
            .field("out_difference", &self.out_difference)
            .field("translate_residue", &self.translate_residue)
            .field("has_shift_hook", &self.on_shift.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}

//! # Quadrants and Columns
//!
//! A quadrant is one fixed-size cell of the grid. It never changes size;
//! per frame only its dirty flag and its membership list change.
//!
//! Quadrants and columns store their origin and their size. Right and
//! bottom edges are derived, so every quadrant of a grid has the grid's
//! cell size no matter how often it is translated.

use crate::bounds::Bounds;
use crate::thing::ThingId;

/// Stable identifier of a quadrant.
///
/// Assigned from a counter that never repeats, so an ID held past its
/// quadrant's recycling is recognisably stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct QuadrantId(u64);

impl QuadrantId {
    /// Wraps a raw counter value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Stable identifier of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ColumnId(u64);

impl ColumnId {
    /// Wraps a raw counter value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One grid cell.
///
/// `S` is the render surface handed out by the grid's surface factory.
#[derive(Debug)]
pub struct Quadrant<S> {
    id: QuadrantId,
    column: ColumnId,
    row: usize,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    changed: bool,
    things: Vec<ThingId>,
    surface: S,
}

impl<S> Quadrant<S> {
    /// New quadrants start changed so they are drawn at least once.
    pub(crate) fn new(
        id: QuadrantId,
        column: ColumnId,
        row: usize,
        (left, top): (f32, f32),
        (width, height): (f32, f32),
        surface: S,
    ) -> Self {
        Self {
            id,
            column,
            row,
            left,
            top,
            width,
            height,
            changed: true,
            things: Vec::new(),
            surface,
        }
    }

    /// Identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> QuadrantId {
        self.id
    }

    /// Column this quadrant belongs to.
    #[inline]
    #[must_use]
    pub const fn column(&self) -> ColumnId {
        self.column
    }

    /// Row index, top to bottom.
    #[inline]
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Cell bounds.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.right(), self.bottom())
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.top
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Cell width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Cell height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Whether the quadrant needs redrawing.
    #[inline]
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Flags the quadrant for redraw.
    #[inline]
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Clears the redraw flag. Call after drawing.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.changed = false;
    }

    /// Number of things assigned in the current pass.
    #[inline]
    #[must_use]
    pub fn num_things(&self) -> usize {
        self.things.len()
    }

    /// Things assigned in the current pass, in assignment order.
    #[inline]
    #[must_use]
    pub fn things(&self) -> &[ThingId] {
        &self.things
    }

    /// Render surface.
    #[inline]
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable render surface, for drawing.
    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub(crate) fn clear_things(&mut self) {
        self.things.clear();
    }

    pub(crate) fn push_thing(&mut self, thing: ThingId) {
        self.things.push(thing);
    }

    pub(crate) fn translate(&mut self, dx: f32) {
        self.left += dx;
    }

    pub(crate) fn into_surface(self) -> S {
        self.surface
    }
}

/// A column of `num_rows` quadrants sharing one horizontal span.
///
/// The quadrants themselves live in the grid's flat list; a column only
/// records where its span is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    id: ColumnId,
    left: f32,
    width: f32,
}

impl Column {
    pub(crate) const fn new(id: ColumnId, left: f32, width: f32) -> Self {
        Self { id, left, width }
    }

    /// Identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Left edge shared by every quadrant in the column.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Right edge shared by every quadrant in the column.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Width shared by every quadrant in the column.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    pub(crate) fn translate(&mut self, dx: f32) {
        self.left += dx;
    }
}

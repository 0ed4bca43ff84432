//! # Things
//!
//! Things are caller-owned movable entities. The grid only needs a few
//! capabilities from them, captured by the [`Thing`] trait:
//! - An identifier to store in quadrant membership lists
//! - A bounding box
//! - A changed flag (set when the thing needs redrawing)
//! - An [`Occupancy`] the grid can rewrite every pass

use crate::bounds::Bounds;
use crate::quadrant::QuadrantId;

/// Identifier of a thing inside quadrant membership lists.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Index in the caller's storage
/// - Upper 32 bits: Generation counter for detecting stale references
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ThingId(u64);

impl ThingId {
    /// Creates a thing ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the packed representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

/// The quadrants a thing was assigned during the last pass, plus the cap on
/// how many it may receive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    quadrants: Vec<QuadrantId>,
    max_quadrants: usize,
}

impl Occupancy {
    /// Creates an empty occupancy that accepts up to `max_quadrants`.
    #[must_use]
    pub fn new(max_quadrants: usize) -> Self {
        Self {
            quadrants: Vec::with_capacity(max_quadrants),
            max_quadrants,
        }
    }

    /// Maximum quadrants per pass.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.max_quadrants
    }

    /// Changes the capacity. Takes effect on the next pass.
    pub fn set_capacity(&mut self, max_quadrants: usize) {
        self.max_quadrants = max_quadrants;
    }

    /// Number of quadrants currently occupied.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.quadrants.len()
    }

    /// Returns true if no quadrant is occupied.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quadrants.is_empty()
    }

    /// Returns true once the capacity is reached.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.quadrants.len() >= self.max_quadrants
    }

    /// Occupied quadrants in grid order.
    #[inline]
    #[must_use]
    pub fn quadrants(&self) -> &[QuadrantId] {
        &self.quadrants
    }

    /// Returns true if `id` is occupied.
    #[must_use]
    pub fn contains(&self, id: QuadrantId) -> bool {
        self.quadrants.contains(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.quadrants.clear();
    }

    pub(crate) fn push(&mut self, id: QuadrantId) {
        self.quadrants.push(id);
    }
}

/// Capabilities the membership engine needs from an entity.
pub trait Thing {
    /// Identifier recorded in quadrant membership lists.
    fn id(&self) -> ThingId;

    /// Current bounding box. Must be well formed.
    fn bounds(&self) -> Bounds;

    /// Whether the thing changed since it was last drawn.
    fn is_changed(&self) -> bool;

    /// Quadrants assigned during the last pass.
    fn occupancy(&self) -> &Occupancy;

    /// Mutable access for the membership engine.
    fn occupancy_mut(&mut self) -> &mut Occupancy;
}

impl<T: Thing + ?Sized> Thing for Box<T> {
    fn id(&self) -> ThingId {
        (**self).id()
    }

    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn is_changed(&self) -> bool {
        (**self).is_changed()
    }

    fn occupancy(&self) -> &Occupancy {
        (**self).occupancy()
    }

    fn occupancy_mut(&mut self) -> &mut Occupancy {
        (**self).occupancy_mut()
    }
}

/// A plain thing: a box, a changed flag and an occupancy.
#[derive(Clone, Debug, PartialEq)]
pub struct ThingRecord {
    /// Identifier.
    pub id: ThingId,
    /// Bounding box.
    pub bounds: Bounds,
    /// Needs redrawing.
    pub changed: bool,
    /// Membership written by the grid.
    pub occupancy: Occupancy,
}

impl ThingRecord {
    /// Creates a changed thing with the given capacity.
    #[must_use]
    pub fn new(id: ThingId, bounds: Bounds, max_quadrants: usize) -> Self {
        Self {
            id,
            bounds,
            changed: true,
            occupancy: Occupancy::new(max_quadrants),
        }
    }

    /// Moves the thing and marks it changed when it actually moved.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        if dx != 0.0 || dy != 0.0 {
            self.bounds = self.bounds.translated(dx, dy);
            self.changed = true;
        }
    }

    /// Places the thing at `bounds` and marks it changed.
    pub fn move_to(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.changed = true;
    }
}

impl Thing for ThingRecord {
    fn id(&self) -> ThingId {
        self.id
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn is_changed(&self) -> bool {
        self.changed
    }

    fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    fn occupancy_mut(&mut self) -> &mut Occupancy {
        &mut self.occupancy
    }
}

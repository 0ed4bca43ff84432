//! Axis-aligned bounding boxes in world coordinates.

use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its four edges.
///
/// Y grows downward, so `top <= bottom` for a well-formed box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Bounds {
    /// A zero-sized box at the origin.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Creates a box from its edges.
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a box from its top-left corner and size.
    #[must_use]
    pub fn from_pos_size(pos: (f32, f32), size: (f32, f32)) -> Self {
        Self::new(pos.0, pos.1, pos.0 + size.0, pos.1 + size.1)
    }

    /// Returns the width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Returns the height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Returns true if the edges are ordered (`left <= right`, `top <= bottom`).
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Returns true if `self` touches or overlaps `other` once `tolerance`
    /// is added on every side of `self`.
    ///
    /// Edges count as overlapping, so two boxes that share a border are
    /// members of each other even with zero tolerance.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self, tolerance: f32) -> bool {
        self.right + tolerance >= other.left
            && self.left - tolerance <= other.right
            && self.bottom + tolerance >= other.top
            && self.top - tolerance <= other.bottom
    }

    /// Returns the box moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

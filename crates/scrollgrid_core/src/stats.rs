//! Grid statistics.

/// Counters for one membership pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Things processed.
    pub things: u32,
    /// Thing/quadrant pairs recorded.
    pub assignments: u32,
    /// Things whose scan stopped at capacity.
    pub truncated: u32,
}

impl PassStats {
    /// Average quadrants per thing.
    #[must_use]
    pub fn assignments_per_thing(&self) -> f32 {
        if self.things > 0 {
            #[allow(clippy::cast_precision_loss)]
            let ratio = self.assignments as f32 / self.things as f32;
            ratio
        } else {
            0.0
        }
    }

    /// Returns true if every thing got complete coverage.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.truncated == 0
    }
}

/// Lifetime counters of a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Columns created, resets included.
    pub columns_created: u64,
    /// Columns recycled by window updates.
    pub columns_recycled: u64,
    /// Surfaces requested from the factory.
    pub surfaces_created: u64,
    /// Surfaces handed back to the factory.
    pub surfaces_released: u64,
    /// Full window resets.
    pub resets: u64,
    /// Membership passes started.
    pub passes: u64,
    /// Counters since the most recent `begin_pass`. Things assigned with
    /// `determine_one` after a pass are added to that pass's counters.
    pub last_pass: PassStats,
}

impl GridStats {
    /// Surfaces currently owned by quadrants.
    #[must_use]
    pub fn live_surfaces(&self) -> u64 {
        self.surfaces_created - self.surfaces_released
    }
}

//! # Membership Engine
//!
//! Each frame every thing is tested against every quadrant and the overlap
//! is recorded on both sides. Nothing carries over between passes: each
//! thing's occupancy and each quadrant's thing list are rebuilt from empty.
//!
//! Cost is O(things x quadrants). The quadrant count is small and fixed,
//! and a thing's capacity bounds its scan: once a thing holds as many
//! quadrants as its capacity allows, the remaining quadrants are skipped and
//! the thing's occupancy is a prefix of grid order. Such scans are reported
//! as [`Coverage::Truncated`] and counted in [`PassStats::truncated`].

use crate::grid::QuadrantGrid;
use crate::stats::PassStats;
use crate::surface::SurfaceFactory;
use crate::thing::{Occupancy, Thing};

/// Outcome of assigning one thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Every quadrant was tested.
    Complete,
    /// Capacity was reached with quadrants left untested. The occupancy may
    /// miss quadrants the thing overlaps.
    Truncated,
}

impl<F: SurfaceFactory> QuadrantGrid<F> {
    /// Starts a membership pass: empties every quadrant's thing list.
    ///
    /// Use with [`QuadrantGrid::determine_group`] when things come in groups
    /// of different types.
    pub fn begin_pass(&mut self) {
        for quadrant in &mut self.quadrants {
            quadrant.clear_things();
        }
        self.stats.passes += 1;
        self.stats.last_pass = PassStats::default();
    }

    /// Assigns every thing of one group within the current pass.
    pub fn determine_group<T: Thing>(&mut self, things: &mut [T]) {
        for thing in things {
            self.determine_one(thing);
        }
    }

    /// Runs a full pass over all groups.
    ///
    /// Running it twice on an unchanged set of things produces the same
    /// membership both times.
    pub fn determine_all<T: Thing>(&mut self, groups: &mut [&mut [T]]) -> PassStats {
        self.begin_pass();
        for group in groups.iter_mut() {
            self.determine_group(group);
        }

        let pass = self.stats.last_pass;
        if pass.truncated > 0 {
            tracing::debug!(
                "Membership pass truncated {} of {} things at capacity",
                pass.truncated,
                pass.things
            );
        }
        pass
    }

    /// Recomputes the quadrants of one thing.
    ///
    /// A changed thing marks its old quadrants and its new quadrants for
    /// redraw. An unchanged thing leaves every redraw flag alone.
    ///
    /// Quadrant thing lists are appended to, not rebuilt, and the counts go
    /// into [`GridStats::last_pass`](crate::stats::GridStats::last_pass)
    /// until the next [`QuadrantGrid::begin_pass`]. Call it inside a pass,
    /// or for a single late thing after one.
    pub fn determine_one<T: Thing + ?Sized>(&mut self, thing: &mut T) -> Coverage {
        let changed = thing.is_changed();
        if changed {
            self.mark_occupied_changed(thing.occupancy());
        }

        let id = thing.id();
        let bounds = thing.bounds();
        let tolerance = self.layout.tolerance();

        let occupancy = thing.occupancy_mut();
        occupancy.clear();

        let mut coverage = Coverage::Complete;
        let mut assigned = 0u32;
        for quadrant in &mut self.quadrants {
            if occupancy.is_full() {
                coverage = Coverage::Truncated;
                break;
            }
            if bounds.overlaps(&quadrant.bounds(), tolerance) {
                occupancy.push(quadrant.id());
                quadrant.push_thing(id);
                assigned += 1;
            }
        }

        if changed {
            self.mark_occupied_changed(thing.occupancy());
        }

        let pass = &mut self.stats.last_pass;
        pass.things += 1;
        pass.assignments += assigned;
        if coverage == Coverage::Truncated {
            pass.truncated += 1;
        }
        coverage
    }

    /// Flags every still-present quadrant of `occupancy` for redraw.
    fn mark_occupied_changed(&mut self, occupancy: &Occupancy) {
        for &id in occupancy.quadrants() {
            if let Some(quadrant) = self.quadrant_mut(id) {
                quadrant.mark_changed();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::layout::GridLayout;
    use crate::quadrant::QuadrantId;
    use crate::surface::HeadlessSurfaces;
    use crate::thing::{ThingId, ThingRecord};

    /// 6 x 5 grid of 100 x 100 cells; the first column starts at x = -200
    /// and the first row at y = -100.
    fn clean_grid() -> QuadrantGrid<HeadlessSurfaces> {
        let layout = GridLayout::new(300.0, 300.0, 5, 6).unwrap();
        let mut grid = QuadrantGrid::new(layout, HeadlessSurfaces::new());
        grid.clear_changed();
        grid
    }

    fn thing(index: u32, bounds: Bounds, capacity: usize) -> ThingRecord {
        ThingRecord::new(ThingId::new(index, 0), bounds, capacity)
    }

    fn cell(grid: &QuadrantGrid<HeadlessSurfaces>, left: f32, top: f32) -> QuadrantId {
        grid.quadrants()
            .iter()
            .find(|q| q.left() == left && q.top() == top)
            .map(|q| q.id())
            .unwrap()
    }

    #[test]
    fn test_interior_thing_has_one_quadrant() {
        let mut grid = clean_grid();
        let mut player = thing(1, Bounds::new(10.0, 10.0, 40.0, 40.0), 8);

        assert_eq!(grid.determine_one(&mut player), Coverage::Complete);

        let home = cell(&grid, 0.0, 0.0);
        assert_eq!(player.occupancy.quadrants(), &[home]);
        assert_eq!(grid.quadrant(home).unwrap().things(), &[player.id]);
    }

    #[test]
    fn test_straddling_thing_is_in_four_quadrants() {
        let mut grid = clean_grid();
        let mut crate_box = thing(2, Bounds::new(50.0, 50.0, 150.0, 150.0), 8);

        grid.determine_one(&mut crate_box);

        let expected = [
            cell(&grid, 0.0, 0.0),
            cell(&grid, 0.0, 100.0),
            cell(&grid, 100.0, 0.0),
            cell(&grid, 100.0, 100.0),
        ];
        assert_eq!(crate_box.occupancy.quadrants(), &expected);
    }

    #[test]
    fn test_capacity_keeps_grid_order_prefix() {
        let mut grid = clean_grid();
        let mut wide = thing(3, Bounds::new(50.0, 50.0, 150.0, 150.0), 2);

        assert_eq!(grid.determine_one(&mut wide), Coverage::Truncated);

        let first_two = [cell(&grid, 0.0, 0.0), cell(&grid, 0.0, 100.0)];
        assert_eq!(wide.occupancy.quadrants(), &first_two);
        assert_eq!(grid.stats().last_pass.truncated, 1);
    }

    #[test]
    fn test_truncation_needs_untested_quadrants() {
        let mut grid = clean_grid();
        let mut player = thing(4, Bounds::new(10.0, 10.0, 40.0, 40.0), 1);

        // Full with quadrants still untested.
        assert_eq!(grid.determine_one(&mut player), Coverage::Truncated);
        assert_eq!(player.occupancy.len(), 1);

        // Full exactly at the last quadrant.
        let last = grid.rightmost().unwrap().bounds();
        let mut corner = thing(
            5,
            Bounds::from_pos_size((last.left + 10.0, last.top + 10.0), (10.0, 10.0)),
            1,
        );
        assert_eq!(grid.determine_one(&mut corner), Coverage::Complete);
    }

    #[test]
    fn test_tolerance_extends_membership() {
        let layout = GridLayout::new(300.0, 300.0, 5, 6)
            .unwrap()
            .with_tolerance(5.0)
            .unwrap();
        let mut grid = QuadrantGrid::new(layout, HeadlessSurfaces::new());
        let mut near_edge = thing(6, Bounds::new(10.0, 10.0, 96.0, 40.0), 8);

        grid.determine_one(&mut near_edge);

        assert_eq!(near_edge.occupancy.len(), 2);
        assert!(near_edge.occupancy.contains(cell(&grid, 100.0, 0.0)));
    }

    #[test]
    fn test_determine_all_is_idempotent() {
        let mut grid = clean_grid();
        let mut heroes = vec![
            thing(1, Bounds::new(10.0, 10.0, 40.0, 40.0), 8),
            thing(2, Bounds::new(90.0, 90.0, 210.0, 110.0), 8),
        ];
        let mut enemies = vec![thing(3, Bounds::new(-150.0, 150.0, -120.0, 180.0), 8)];

        let first = grid.determine_all(&mut [&mut heroes[..], &mut enemies[..]]);
        let snapshot: Vec<_> = grid.quadrants().iter().map(|q| q.things().to_vec()).collect();
        let occupancy: Vec<_> = heroes.iter().chain(&enemies).map(|t| t.occupancy.clone()).collect();

        let second = grid.determine_all(&mut [&mut heroes[..], &mut enemies[..]]);
        let again: Vec<_> = grid.quadrants().iter().map(|q| q.things().to_vec()).collect();
        let occupancy_again: Vec<_> = heroes.iter().chain(&enemies).map(|t| t.occupancy.clone()).collect();

        assert_eq!(first, second);
        assert_eq!(snapshot, again);
        assert_eq!(occupancy, occupancy_again);
        assert_eq!(first.things, 3);
        assert_eq!(grid.stats().passes, 2);
    }

    #[test]
    fn test_changed_thing_dirties_old_and_new_quadrants() {
        let mut grid = clean_grid();
        let mut runner = thing(7, Bounds::new(10.0, 10.0, 40.0, 40.0), 8);

        grid.determine_one(&mut runner);
        let a = cell(&grid, 0.0, 0.0);
        grid.clear_changed();

        runner.move_to(Bounds::new(210.0, 10.0, 240.0, 40.0));
        grid.determine_one(&mut runner);
        let b = cell(&grid, 200.0, 0.0);

        assert!(grid.quadrant(a).unwrap().is_changed());
        assert!(grid.quadrant(b).unwrap().is_changed());
        assert_eq!(grid.changed_quadrants().count(), 2);
    }

    #[test]
    fn test_unchanged_thing_leaves_flags_alone() {
        let mut grid = clean_grid();
        let mut statue = thing(8, Bounds::new(10.0, 10.0, 40.0, 40.0), 8);
        statue.changed = false;

        grid.determine_one(&mut statue);
        assert_eq!(grid.changed_quadrants().count(), 0);

        // A quadrant already dirty stays dirty.
        let home = cell(&grid, 0.0, 0.0);
        grid.quadrant_mut(home).unwrap().mark_changed();
        grid.determine_one(&mut statue);
        assert_eq!(grid.changed_quadrants().count(), 1);
    }

    #[test]
    fn test_recycled_quadrants_are_skipped_when_marking() {
        let mut grid = clean_grid();
        let mut stray = thing(9, Bounds::new(-190.0, 10.0, -180.0, 20.0), 8);
        grid.determine_one(&mut stray);
        let old = stray.occupancy.quadrants()[0];

        grid.update_window(0.0);
        assert!(grid.quadrant(old).is_none());

        // Old quadrant is gone; the thing now sits outside the window.
        assert_eq!(grid.determine_one(&mut stray), Coverage::Complete);
        assert!(stray.occupancy.is_empty());
    }

    #[test]
    fn test_late_thing_counts_toward_current_pass() {
        let mut grid = clean_grid();
        let mut crowd = vec![thing(1, Bounds::new(10.0, 10.0, 40.0, 40.0), 8)];
        let mut late = thing(2, Bounds::new(50.0, 50.0, 150.0, 150.0), 8);

        let pass = grid.determine_all(&mut [&mut crowd[..]]);
        assert_eq!(pass.things, 1);

        grid.determine_one(&mut late);
        let stats = grid.stats().last_pass;
        assert_eq!(stats.things, 2);
        assert_eq!(stats.assignments, 5);
        assert_eq!(grid.stats().passes, 1);

        grid.begin_pass();
        assert_eq!(grid.stats().last_pass, PassStats::default());
        assert!(grid.quadrants().iter().all(|q| q.num_things() == 0));
    }

    #[test]
    fn test_boxed_things_mix_types() {
        let mut grid = clean_grid();
        let mut things: Vec<Box<dyn Thing>> = vec![
            Box::new(thing(1, Bounds::new(10.0, 10.0, 40.0, 40.0), 8)),
            Box::new(thing(2, Bounds::new(110.0, 10.0, 140.0, 40.0), 8)),
        ];

        let pass = grid.determine_all(&mut [&mut things[..]]);

        assert_eq!(pass.things, 2);
        assert_eq!(pass.assignments, 2);
        assert_eq!(things[1].occupancy().len(), 1);
    }
}

//! # Scrolling Window Integration Tests
//!
//! Drives a grid through long scrolls and checks that the window keeps its
//! shape, its order and its surfaces balanced, and that membership stays
//! correct while columns are recycled underneath it.
//!
//! Run with: cargo test --package scrollgrid_core --test scroll_window_test

use std::sync::{Arc, Mutex};

use scrollgrid_core::{
    Bounds, CanvasFactory, ColumnShift, GridConfig, GridLayout, HeadlessSurfaces, QuadrantGrid,
    ThingId, ThingRecord,
};

/// 6 columns x 5 rows of 100 x 100.
fn small_layout() -> GridLayout {
    GridLayout::new(300.0, 300.0, 5, 6).unwrap()
}

fn assert_window_shape<F: scrollgrid_core::SurfaceFactory>(grid: &QuadrantGrid<F>) {
    assert_eq!(grid.num_quadrants(), grid.num_rows() * grid.num_cols());
    assert_eq!(grid.columns().len(), grid.num_cols());
    for q in grid.quadrants() {
        assert_eq!(q.right() - q.left(), grid.cell_width());
        assert_eq!(q.bottom() - q.top(), grid.cell_height());
    }
    let lefts: Vec<f32> = grid.columns().map(|c| c.left()).collect();
    assert!(lefts.windows(2).all(|w| w[0] < w[1]), "columns out of order: {lefts:?}");
    assert!(grid.is_consistent());
}

#[test]
fn test_shape_survives_long_scroll() {
    let mut grid = QuadrantGrid::new(small_layout(), CanvasFactory::new());
    let deltas = [3.0, 17.0, 0.0, 64.0, 250.0, 1.0, 99.0, 100.0, 420.0, 8.0];

    for frame in 0..2_000 {
        let dx = deltas[frame % deltas.len()];
        grid.translate(-dx);
        grid.update_window(dx);
        assert_window_shape(&grid);
    }

    let stats = *grid.stats();
    assert!(stats.columns_recycled > 100);
    assert_eq!(grid.factory().live(), 30);
    assert_eq!(stats.live_surfaces(), 30);
    assert_eq!(grid.factory().released(), stats.columns_recycled * 5);
}

#[test]
fn test_default_config_shape_with_fractional_scroll() {
    // 640 / (6 - 3) leaves a fractional cell width.
    let mut grid = QuadrantGrid::from_config(&GridConfig::default(), CanvasFactory::new()).unwrap();
    assert_ne!(grid.cell_width().fract(), 0.0);
    assert_window_shape(&grid);

    let deltas = [4.0, 0.1, 2.75, 13.3, 333.3, 0.001, 7.77];
    let mut scrolled = 0.0f64;
    for frame in 0..3_000 {
        let dx = deltas[frame % deltas.len()];
        grid.translate(-dx);
        grid.update_window(dx);
        scrolled += f64::from(dx);
        assert_window_shape(&grid);
    }

    let stats = *grid.stats();
    let cell = f64::from(grid.cell_width());
    assert!(stats.columns_recycled as f64 >= scrolled / cell - 2.0);
    assert_eq!(grid.factory().live(), 30);
}

#[test]
fn test_one_recycle_at_exact_trigger() {
    let mut grid = QuadrantGrid::new(small_layout(), HeadlessSurfaces::new());
    assert_eq!(grid.leftmost().unwrap().left(), -200.0);
    assert_eq!(grid.scroll_trigger(), -200.0);

    assert_eq!(grid.update_window(250.0), 1);
    assert_eq!(grid.leftmost().unwrap().left(), -100.0);
    assert_window_shape(&grid);
}

#[test]
fn test_hook_sees_every_shift_in_order() {
    let log: Arc<Mutex<Vec<ColumnShift>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let mut grid = QuadrantGrid::new(small_layout(), HeadlessSurfaces::new())
        .with_shift_hook(move |shift| sink.lock().unwrap().push(*shift));

    let mut recycled = 0;
    for _ in 0..50 {
        grid.translate(-40.0);
        recycled += grid.update_window(40.0);
    }

    let log = log.lock().unwrap();
    assert_eq!(log.len(), recycled);
    assert!(log.windows(2).all(|w| w[0].removed < w[1].removed));
    assert!(log.windows(2).all(|w| w[0].added < w[1].added));
}

#[test]
fn test_membership_follows_scrolling_world() {
    let config = GridConfig {
        screen_width: 300.0,
        screen_height: 300.0,
        num_rows: 5,
        num_cols: 6,
        tolerance: 0.0,
        scroll_trigger: None,
    };
    let mut grid = QuadrantGrid::from_config(&config, HeadlessSurfaces::new()).unwrap();

    // A thing standing still in the world drifts left on screen.
    let mut post = vec![ThingRecord::new(
        ThingId::new(0, 0),
        Bounds::new(250.0, 110.0, 260.0, 190.0),
        4,
    )];

    for _ in 0..39 {
        grid.translate(-10.0);
        for thing in &mut post {
            thing.translate(-10.0, 0.0);
        }
        grid.update_window(10.0);
        let pass = grid.determine_all(&mut [&mut post[..]]);
        assert!(pass.is_complete());

        let bounds = post[0].bounds;
        for &id in post[0].occupancy.quadrants() {
            let quadrant = grid.quadrant(id).unwrap();
            assert!(bounds.overlaps(&quadrant.bounds(), 0.0));
            assert_eq!(quadrant.things(), &[post[0].id]);
        }
        let expected = grid
            .quadrants()
            .iter()
            .filter(|q| bounds.overlaps(&q.bounds(), 0.0))
            .count();
        assert_eq!(post[0].occupancy.len(), expected);
    }

    // 390 units of scroll: the post is at x = -140, inside the leftmost column.
    assert_eq!(post[0].bounds.left, -140.0);
    assert_eq!(grid.leftmost().unwrap().left(), -190.0);
    assert_eq!(post[0].occupancy.len(), 1);

    // One more step puts that column on the trigger and it is recycled.
    grid.translate(-10.0);
    post[0].translate(-10.0, 0.0);
    assert_eq!(grid.update_window(10.0), 1);
    grid.determine_all(&mut [&mut post[..]]);
    assert!(post[0].occupancy.is_empty());
}

#[test]
fn test_dirty_flags_after_scroll_and_move() {
    let mut grid = QuadrantGrid::new(small_layout(), HeadlessSurfaces::new());
    grid.update_window(0.0);
    let mut runner = vec![ThingRecord::new(
        ThingId::new(1, 0),
        Bounds::new(10.0, 10.0, 40.0, 40.0),
        8,
    )];
    grid.determine_all(&mut [&mut runner[..]]);
    grid.clear_changed();
    runner[0].changed = false;

    // Nothing moved: no flags.
    grid.determine_all(&mut [&mut runner[..]]);
    assert_eq!(grid.changed_quadrants().count(), 0);

    // Moved one cell right: old and new cell both dirty.
    runner[0].translate(100.0, 0.0);
    grid.determine_all(&mut [&mut runner[..]]);
    let dirty: Vec<f32> = grid.changed_quadrants().map(|q| q.left()).collect();
    assert_eq!(dirty, vec![0.0, 100.0]);
}

//! # Window Benchmark
//!
//! Measures column recycling while scrolling at a steady speed, and a full
//! window reset.
//!
//! Run with: cargo bench --package scrollgrid_core --bench window_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scrollgrid_core::{CanvasFactory, GridLayout, HeadlessSurfaces, QuadrantGrid};

fn bench_scroll_frame(c: &mut Criterion) {
    let layout = GridLayout::new(640.0, 480.0, 8, 11).unwrap();
    let mut grid = QuadrantGrid::new(layout, CanvasFactory::new());

    c.bench_function("scroll_frame_8px", |b| {
        b.iter(|| {
            grid.translate(-8.0);
            black_box(grid.update_window(black_box(8.0)))
        });
    });
}

fn bench_reset(c: &mut Criterion) {
    let layout = GridLayout::new(640.0, 480.0, 8, 11).unwrap();
    let mut grid = QuadrantGrid::new(layout, HeadlessSurfaces::new());

    c.bench_function("reset_all", |b| {
        b.iter(|| grid.reset_all());
    });
}

criterion_group!(benches, bench_scroll_frame, bench_reset);
criterion_main!(benches);

//! # Membership Benchmark
//!
//! Measures a full membership pass: every thing against every quadrant.
//!
//! Run with: cargo bench --package scrollgrid_core --bench membership_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scrollgrid_core::{Bounds, GridLayout, HeadlessSurfaces, QuadrantGrid, ThingId, ThingRecord};

/// Things spread over the viewport, 32 x 32 each.
fn population(count: u32) -> Vec<ThingRecord> {
    (0..count)
        .map(|i| {
            let x = (i * 37 % 640) as f32;
            let y = (i * 53 % 480) as f32;
            ThingRecord::new(
                ThingId::new(i, 0),
                Bounds::from_pos_size((x, y), (32.0, 32.0)),
                8,
            )
        })
        .collect()
}

fn bench_determine_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("determine_all");

    for count in [100u32, 1_000, 10_000] {
        let layout = GridLayout::new(640.0, 480.0, 8, 11).unwrap();
        let mut grid = QuadrantGrid::new(layout, HeadlessSurfaces::new());
        let mut things = population(count);

        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("things", count), &count, |b, _| {
            b.iter(|| black_box(grid.determine_all(&mut [&mut things[..]])));
        });
    }

    group.finish();
}

fn bench_capacity_cutoff(c: &mut Criterion) {
    let layout = GridLayout::new(640.0, 480.0, 8, 11).unwrap();
    let mut grid = QuadrantGrid::new(layout, HeadlessSurfaces::new());

    // One huge thing covering the whole window, capped at 4 quadrants.
    let mut giant = vec![ThingRecord::new(
        ThingId::new(0, 0),
        Bounds::new(-1000.0, -1000.0, 2000.0, 2000.0),
        4,
    )];

    c.bench_function("capacity_cutoff_giant", |b| {
        b.iter(|| black_box(grid.determine_all(&mut [&mut giant[..]])));
    });
}

criterion_group!(benches, bench_determine_all, bench_capacity_cutoff);
criterion_main!(benches);

//! Criterion micro-benchmarks for wall painting and collision queries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use drift_bench::walled_map;
use drift_core::GridDims;
use drift_engine::Scenario;
use drift_space::{collides, LineCells, ObstacleMap};

/// Benchmark: collision test at every cell center of a 100x100 map.
fn bench_collides_sweep_10k(c: &mut Criterion) {
    let map = walled_map(100, Scenario::Traffic, 2);

    c.bench_function("collides_sweep_10k_r2", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for y in 0..100 {
                for x in 0..100 {
                    hits += collides(&map, x as f64, y as f64, 2.0) as usize;
                }
            }
            black_box(hits);
        });
    });
}

/// Benchmark: the same sweep with a large radius, dominated by the
/// neighborhood scan.
fn bench_collides_sweep_large_radius(c: &mut Criterion) {
    let map = walled_map(100, Scenario::Obstacles, 2);

    c.bench_function("collides_sweep_10k_r8", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for y in 0..100 {
                for x in 0..100 {
                    hits += collides(&map, x as f64, y as f64, 8.0) as usize;
                }
            }
            black_box(hits);
        });
    });
}

/// Benchmark: paint a thick diagonal across a fresh 316x316 map.
fn bench_paint_line_thick(c: &mut Criterion) {
    let dims = GridDims::new(316, 316).unwrap();

    c.bench_function("paint_line_316_t4", |b| {
        b.iter(|| {
            let mut map = ObstacleMap::new(dims);
            let n = map.paint_line((0, 0), (315, 315), 4);
            black_box(n);
        });
    });
}

/// Benchmark: rasterize a long segment without painting.
fn bench_line_cells(c: &mut Criterion) {
    c.bench_function("line_cells_1000", |b| {
        b.iter(|| {
            let n = LineCells::new((0, 0), (1000, 377)).count();
            black_box(n);
        });
    });
}

criterion_group!(
    benches,
    bench_collides_sweep_10k,
    bench_collides_sweep_large_radius,
    bench_paint_line_thick,
    bench_line_cells
);
criterion_main!(benches);

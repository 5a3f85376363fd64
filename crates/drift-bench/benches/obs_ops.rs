//! Criterion micro-benchmarks for occupancy rendering.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use drift_bench::{grid_agents, walled_map};
use drift_engine::Scenario;
use drift_obs::{OccupancyField, OccupancyRenderer, RenderConfig, RenderMode};

fn renderer(mode: RenderMode) -> OccupancyRenderer {
    OccupancyRenderer::new(RenderConfig {
        mode,
        ..RenderConfig::default()
    })
    .unwrap()
}

fn bench_render_modes(c: &mut Criterion) {
    let map = walled_map(100, Scenario::Obstacles, 2);
    let agents = grid_agents(100, 150, 3.0);

    for (name, mode) in [("binary", RenderMode::Binary), ("soft", RenderMode::Soft)] {
        let r = renderer(mode);
        let mut field = OccupancyField::zeros(map.dims());
        c.bench_function(&format!("render_150_{name}"), |b| {
            b.iter(|| {
                let stamped = r.render_into(&mut field, &agents, &map);
                black_box(stamped);
            });
        });
    }
}

fn bench_render_each(c: &mut Criterion) {
    let map = walled_map(100, Scenario::Empty, 0);
    let agents = grid_agents(100, 150, 3.0);
    let r = renderer(RenderMode::Binary);

    c.bench_function("render_each_150", |b| {
        b.iter(|| {
            let fields = r.render_each(&agents, &map);
            black_box(&fields);
        });
    });
}

criterion_group!(benches, bench_render_modes, bench_render_each);
criterion_main!(benches);

//! Drift headless run: a seeded simulation stepped without a display.
//!
//! Demonstrates:
//!   1. Loading a `SimConfig` from JSON (missing fields take defaults)
//!   2. Queueing a pointer stroke from an input thread
//!   3. Ticking and printing per-tick reports
//!   4. Driving the filter hooks with a separate ensemble
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example headless

use std::thread;

use drift_engine::{FilterHooks, ResetScope, SimConfig, Simulation, WallBrush};
use tracing_subscriber::EnvFilter;

// ─── Configuration ──────────────────────────────────────────────

const CONFIG: &str = r#"{
    "width": 80,
    "height": 80,
    "ensemble_size": 60,
    "seed": 2024,
    "scenario": "dispersion",
    "target": { "kind": "cluster" }
}"#;

const TICKS: u64 = 40;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimConfig::from_json_str(CONFIG)?;
    let mut sim = Simulation::new(config)?;
    println!("{sim:?}");

    // ─── Input thread: one diagonal stroke ──────────────────────

    let tx = sim.wall_sender();
    let dims = sim.dims();
    let scale = sim.config().pointer_scale;
    let input = thread::spawn(move || {
        let mut brush = WallBrush::new(dims, scale);
        let mut commands = vec![brush.press(40.0, 480.0)];
        for step in 1..=8 {
            let s = step as f64 * 20.0;
            commands.extend(brush.drag(40.0 + s, 480.0 - s));
        }
        brush.release();
        commands
            .into_iter()
            .filter(|cmd| tx.submit(*cmd).is_ok())
            .count()
    });
    let queued = input.join().map_err(|_| "input thread panicked")?;
    println!("queued {queued} wall commands");

    // ─── Headless ticks ─────────────────────────────────────────

    for _ in 0..TICKS {
        let r = sim.tick();
        if r.tick.0 % 10 == 0 || r.wall_commands > 0 {
            println!(
                "tick {:>3}  walls {:>4}  moved {:>3} slid {:>3} blocked {:>3}  lit {:>3}  error {:.2}",
                r.tick.0,
                r.blocked_cells,
                r.ensemble.moved,
                r.ensemble.slid,
                r.ensemble.blocked,
                r.lit_cells,
                r.tracking_error.unwrap_or(f64::NAN),
            );
        }
    }

    // ─── Filter hooks on a private ensemble ─────────────────────

    let mut particles = sim.ensemble().to_vec();
    let summary = FilterHooks::dynamics(&mut sim, &mut particles);
    let fields = FilterHooks::observe(&sim, &particles);
    let truth = sim.observe_truth();
    let best = fields
        .iter()
        .filter_map(|f| f.mean_abs_diff(&truth))
        .fold(f64::INFINITY, f64::min);
    println!(
        "filter step: {} collisions, {} fields, best mismatch {best:.4}",
        summary.collisions(),
        fields.len()
    );

    sim.reset(ResetScope::All);
    println!("after reset: tick {}", sim.current_tick());
    Ok(())
}

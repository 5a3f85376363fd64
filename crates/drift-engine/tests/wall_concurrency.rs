//! Integration test: wall painting from other threads.
//!
//! Painting is serialized with ticks: queued commands land at the start of
//! the next tick, and direct painting through a `WallHandle` blocks while a
//! tick holds the lock. Either way every paint is eventually visible and no
//! tick observes a torn map.

use std::thread;

use drift_engine::{EngineError, SimConfig, Simulation, WallBrush, WallCommand};

fn config(seed: u64) -> SimConfig {
    SimConfig {
        width: 64,
        height: 64,
        ensemble_size: 32,
        wall_thickness: 1,
        seed,
        ..SimConfig::default()
    }
}

#[test]
fn queued_strokes_from_input_thread_are_all_applied() {
    let mut sim = Simulation::new(config(11)).unwrap();
    let tx = sim.wall_sender();
    let dims = sim.dims();

    let input = thread::spawn(move || {
        let mut brush = WallBrush::new(dims, 8.0);
        let mut sent = vec![brush.press(80.0, 80.0)];
        for i in 1..20 {
            if let Some(cmd) = brush.drag(80.0 + i as f64 * 16.0, 80.0) {
                sent.push(cmd);
            }
        }
        brush.release();
        for cmd in &sent {
            tx.submit(*cmd).unwrap();
        }
        sent
    });
    let sent = input.join().unwrap();

    let report = sim.tick();
    assert_eq!(report.wall_commands, sent.len());
    let map = sim.wall_handle().snapshot();
    for x in 10..=48 {
        assert!(map.is_blocked(x, 10), "cell ({x}, 10) not painted");
    }
    assert_eq!(report.blocked_cells, map.blocked_count());
}

#[test]
fn concurrent_handle_painting_does_not_tear_ticks() {
    let mut sim = Simulation::new(config(5)).unwrap();
    let handle = sim.wall_handle();

    let painter = thread::spawn(move || {
        for y in 4..60 {
            handle.apply(WallCommand::Line((4, y), (59, y)), 0);
        }
    });
    let mut last_blocked = 0;
    for _ in 0..50 {
        let report = sim.tick();
        // Walls only grow while the painter runs.
        assert!(report.blocked_cells >= last_blocked);
        last_blocked = report.blocked_cells;
    }
    painter.join().unwrap();
    let report = sim.tick();
    assert_eq!(report.blocked_cells, 56 * 56);
}

#[test]
fn identical_queued_input_gives_identical_runs() {
    let run = || {
        let mut sim = Simulation::new(config(21)).unwrap();
        let tx = sim.wall_sender();
        let mut reports = Vec::new();
        for t in 0..30 {
            if t % 5 == 0 {
                tx.submit(WallCommand::Point((t + 10, 32))).unwrap();
            }
            reports.push(sim.tick());
        }
        (reports, sim.ensemble().to_vec())
    };
    assert_eq!(run(), run());
}

#[test]
fn dropped_simulation_closes_queue() {
    let sim = Simulation::new(config(0)).unwrap();
    let tx = sim.wall_sender();
    drop(sim);
    assert_eq!(tx.submit(WallCommand::Clear), Err(EngineError::WallQueueClosed));
}

//! Integration test: the filter-facing driver surface.
//!
//! Exercises dynamics / observe / paint / reset the way an external
//! particle filter would, including the concrete wall and rendering cases.

use drift_core::{Agent, TickId};
use drift_engine::{FilterHooks, ResetScope, Scenario, SimConfig, Simulation, TargetConfig};
use drift_motion::{MotionParams, Perturbation};
use drift_obs::{RenderConfig, RenderMode};
use drift_test_utils::agent;
use proptest::prelude::*;

fn grid10() -> SimConfig {
    SimConfig {
        width: 10,
        height: 10,
        ensemble_size: 1,
        wall_thickness: 1,
        render: RenderConfig {
            mode: RenderMode::Binary,
            suppress_colliding: false,
            min_radius: 1.0,
        },
        ..SimConfig::default()
    }
}

#[test]
fn wall_ahead_reflects_and_holds_position() {
    let mut sim = Simulation::new(grid10()).unwrap();
    sim.paint_point(5, 5);
    let mut ensemble = vec![agent(5.0, 3.0, 1.0, 0.0, 1.0)];
    let summary = sim.dynamics(&mut ensemble);
    assert_eq!(summary.blocked, 1);
    assert_eq!(ensemble[0].position(), (5.0, 3.0));
    assert!((ensemble[0].vy + 0.8).abs() < 1e-12);
}

#[test]
fn observation_of_radius_two_disk() {
    let sim = Simulation::new(grid10()).unwrap();
    let fields = sim.observe(&[Agent::new(5.0, 5.0, 2.0)]);
    assert_eq!(fields.len(), 1);
    let f = &fields[0];
    for y in 0..10 {
        for x in 0..10 {
            let d2 = (x - 5) * (x - 5) + (y - 5) * (y - 5);
            let expected = if d2 <= 4 { 1.0 } else { 0.0 };
            assert_eq!(f.get(x, y), Some(expected));
        }
    }
}

#[test]
fn clear_walls_is_idempotent() {
    let sim = Simulation::new(SimConfig {
        scenario: Scenario::Traffic,
        ..SimConfig::default()
    })
    .unwrap();
    assert!(sim.wall_handle().lock().blocked_count() > 0);
    sim.clear_walls();
    let once = sim.wall_handle().snapshot();
    sim.clear_walls();
    assert_eq!(sim.wall_handle().snapshot(), once);
    assert_eq!(once.blocked_count(), 0);
}

#[test]
fn paint_line_is_symmetric_through_driver() {
    let a = Simulation::new(SimConfig::default()).unwrap();
    let b = Simulation::new(SimConfig::default()).unwrap();
    a.paint_line(3, 90, 71, 12);
    b.paint_line(71, 12, 3, 90);
    assert_eq!(a.wall_handle().snapshot(), b.wall_handle().snapshot());
}

#[test]
fn truth_is_rendered_every_tick() {
    let mut sim = Simulation::new(SimConfig {
        width: 50,
        height: 50,
        ensemble_size: 30,
        ..SimConfig::default()
    })
    .unwrap();
    for _ in 0..20 {
        let report = sim.tick();
        assert_eq!(report.lit_cells, sim.observe_truth().lit_count());
        assert!(report.tracking_error.unwrap().is_finite());
    }
    assert_eq!(sim.current_tick(), TickId(20));
}

#[test]
fn full_reset_restarts_the_clock_and_keeps_size() {
    let mut sim = Simulation::new(SimConfig {
        width: 40,
        height: 40,
        ensemble_size: 25,
        target: TargetConfig::Cluster(Default::default()),
        scenario: Scenario::Obstacles,
        ..SimConfig::default()
    })
    .unwrap();
    let walls = sim.wall_handle().snapshot();
    for _ in 0..5 {
        sim.tick();
    }
    sim.paint_line(0, 0, 39, 39);
    sim.reset(ResetScope::All);
    assert_eq!(sim.current_tick(), TickId(0));
    assert_eq!(sim.ensemble().len(), 25);
    assert_eq!(sim.wall_handle().snapshot(), walls);
}

fn run_hooks<F: FilterHooks>(hooks: &mut F, ensemble: &mut [Agent], steps: usize) {
    for _ in 0..steps {
        hooks.dynamics(ensemble);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn speed_bound_holds_over_many_ticks(seed in any::<u64>(), scenario in 0usize..4) {
        let motion = MotionParams {
            thermal: Perturbation::Gaussian { sigma: 0.2 },
            bounce_jitter: Perturbation::Gaussian { sigma: 0.1 },
            velocity_jitter: Perturbation::Uniform { half_range: 0.3 },
            max_speed: 1.5,
            ..MotionParams::default()
        };
        let mut sim = Simulation::new(SimConfig {
            width: 48,
            height: 48,
            ensemble_size: 16,
            seed,
            motion,
            scenario: Scenario::ALL[scenario],
            ..SimConfig::default()
        })
        .unwrap();
        let mut ensemble = sim.ensemble().to_vec();
        run_hooks(&mut sim, &mut ensemble, 40);
        for a in &ensemble {
            prop_assert!(a.speed() <= 1.5 + 1e-9);
        }
    }
}

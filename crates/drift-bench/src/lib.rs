//! Benchmark profiles and utilities for the Drift particle simulation.
//!
//! Provides pre-built [`SimConfig`] profiles and fixtures for benchmarking:
//!
//! - [`reference_profile`]: 100x100 grid, 150 agents, the traffic layout
//! - [`stress_profile`]: 316x316 grid, 1500 agents, the same layout scaled up
//! - [`walled_map`]: a bare obstacle map with a scenario painted in
//! - [`grid_agents`]: deterministic agents laid out on a lattice

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use drift_core::{Agent, GridDims};
use drift_engine::{Scenario, SimConfig};
use drift_space::ObstacleMap;

/// Build a reference benchmark profile: 100x100 grid (10K cells).
///
/// 150 agents under the default bouncing dynamics, traffic walls at
/// thickness 2.
pub fn reference_profile(seed: u64) -> SimConfig {
    SimConfig {
        width: 100,
        height: 100,
        ensemble_size: 150,
        wall_thickness: 2,
        seed,
        scenario: Scenario::Traffic,
        ..SimConfig::default()
    }
}

/// Build a stress benchmark profile: 316x316 grid (~100K cells).
///
/// Same layout as [`reference_profile`] with 10x the agents.
pub fn stress_profile(seed: u64) -> SimConfig {
    SimConfig {
        width: 316,
        height: 316,
        ensemble_size: 1500,
        ..reference_profile(seed)
    }
}

/// An obstacle map of `side`x`side` with `scenario` painted at
/// `thickness`. Panics if `side` is zero.
pub fn walled_map(side: u32, scenario: Scenario, thickness: u32) -> ObstacleMap {
    let mut map = ObstacleMap::new(GridDims::new(side, side).unwrap());
    scenario.apply(&mut map, thickness);
    map
}

/// `n` agents of `radius` on a lattice covering a `side`x`side` grid.
///
/// Velocities cycle through a fixed set of headings so that some agents
/// move into walls and some move away.
pub fn grid_agents(side: u32, n: usize, radius: f64) -> Vec<Agent> {
    const HEADINGS: [(f64, f64); 4] = [(1.0, 0.5), (-0.5, 1.0), (-1.0, -0.5), (0.5, -1.0)];
    let per_row = (n as f64).sqrt().ceil().max(1.0) as usize;
    let pitch = side as f64 / (per_row + 1) as f64;
    (0..n)
        .map(|i| {
            let x = pitch * ((i % per_row) + 1) as f64;
            let y = pitch * ((i / per_row) + 1) as f64;
            let (vx, vy) = HEADINGS[i % HEADINGS.len()];
            Agent::new(x, y, radius).with_velocity(vx, vy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        reference_profile(42).validate().unwrap();
    }

    #[test]
    fn stress_profile_validates() {
        let cfg = stress_profile(42);
        cfg.validate().unwrap();
        assert_eq!(cfg.width, 316);
        assert_eq!(cfg.scenario, Scenario::Traffic);
    }

    #[test]
    fn grid_agents_stay_inside() {
        let agents = grid_agents(100, 150, 2.0);
        assert_eq!(agents.len(), 150);
        for a in &agents {
            assert!(a.x > 0.0 && a.x < 100.0);
            assert!(a.y > 0.0 && a.y < 100.0);
        }
    }

    #[test]
    fn walled_map_has_walls() {
        assert!(walled_map(100, Scenario::Obstacles, 2).blocked_count() > 0);
        assert_eq!(walled_map(100, Scenario::Empty, 2).blocked_count(), 0);
    }
}

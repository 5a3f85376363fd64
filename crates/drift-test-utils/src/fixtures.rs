//! Reusable fixtures: seeded generators and agent layouts.

use drift_core::Agent;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator every Drift component is tested with, seeded.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Agent at `(x, y)` with radius `r` and velocity `(vx, vy)`.
pub fn agent(x: f64, y: f64, r: f64, vx: f64, vy: f64) -> Agent {
    Agent::new(x, y, r).with_velocity(vx, vy)
}

/// `n` resting agents of radius `r` evenly spaced on a circle.
pub fn ring(center: (f64, f64), ring_radius: f64, n: usize, r: f64) -> Vec<Agent> {
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            Agent::new(
                center.0 + ring_radius * a.cos(),
                center.1 + ring_radius * a.sin(),
                r,
            )
        })
        .collect()
}

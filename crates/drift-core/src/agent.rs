//! The agent record advanced by the motion models.

use serde::{Deserialize, Serialize};

/// A simulated disk: continuous position, footprint radius, and velocity.
///
/// An ensemble is an ordered `Vec<Agent>` (or `&mut [Agent]`); members are
/// processed independently and never created or destroyed mid-run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Horizontal position in grid units.
    pub x: f64,
    /// Vertical position in grid units.
    pub y: f64,
    /// Collision / occupancy footprint radius (>= 0).
    pub radius: f64,
    /// Horizontal velocity in grid units per tick.
    pub vx: f64,
    /// Vertical velocity in grid units per tick.
    pub vy: f64,
}

impl Agent {
    /// Create an agent at rest.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Return a copy with the given velocity.
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Current position as `(x, y)`.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean speed `sqrt(vx² + vy²)`.
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Radius used for geometry tests, floored at `min`.
    ///
    /// A NaN radius yields `min`.
    pub fn collision_radius(&self, min: f64) -> f64 {
        self.radius.max(min)
    }

    /// Whether every attribute is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.radius.is_finite()
            && self.vx.is_finite()
            && self.vy.is_finite()
    }
}

/// Arithmetic mean position of an ensemble, or `None` when it is empty.
pub fn centroid(agents: &[Agent]) -> Option<(f64, f64)> {
    if agents.is_empty() {
        return None;
    }
    let n = agents.len() as f64;
    let (sx, sy) = agents
        .iter()
        .fold((0.0, 0.0), |(sx, sy), a| (sx + a.x, sy + a.y));
    Some((sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_radius_floors_small_and_nan() {
        assert_eq!(Agent::new(0.0, 0.0, 0.2).collision_radius(1.0), 1.0);
        assert_eq!(Agent::new(0.0, 0.0, 3.5).collision_radius(1.0), 3.5);
        assert_eq!(Agent::new(0.0, 0.0, f64::NAN).collision_radius(1.0), 1.0);
    }

    #[test]
    fn speed_is_euclidean() {
        let a = Agent::new(0.0, 0.0, 1.0).with_velocity(3.0, 4.0);
        assert!((a.speed() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_of_empty_is_none() {
        assert_eq!(centroid(&[]), None);
        let pts = [Agent::new(0.0, 0.0, 1.0), Agent::new(4.0, 2.0, 1.0)];
        assert_eq!(centroid(&pts), Some((2.0, 1.0)));
    }
}

//! A cluster of agents moving as one coherent object.
//!
//! Each step computes the cluster centroid, draws one global drift velocity
//! shared by every member, then sets each member's velocity to
//! `drift + gain·(centroid − p) + base_radius·(cos φ, sin φ)·orbital_gain +
//! noise`, advancing φ monotonically. Collisions are resolved per axis the
//! same way [`MotionModel`](crate::MotionModel) does, and positions are
//! finally kept a fixed margin away from the grid edge.

use crate::model::{clamp_speed, resolve, StepSummary};
use crate::noise::{normal, uniform};
use drift_core::error::{check_positive, check_range};
use drift_core::{centroid, Agent, CollisionQuery, ConfigError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Coefficients of a [`CohesionModel`] and of [`Cluster::spawn`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohesionParams {
    /// Number of members spawned.
    pub members: usize,
    /// Orbit radius range `[min, max)` at spawn.
    pub orbit_radius: (f64, f64),
    /// Half-range of the uniform spawn velocity.
    pub spawn_speed: f64,
    /// Member footprint radius range `[min, max)` at spawn.
    pub size: (f64, f64),
    /// Attraction gain toward the centroid.
    pub cohesion_gain: f64,
    /// Phase increment per step, in radians.
    pub phase_rate: f64,
    /// Scale of the orbital term.
    pub orbital_gain: f64,
    /// Standard deviation of per-member velocity noise.
    pub noise_sigma: f64,
    /// Half-range of the shared uniform drift.
    pub drift: f64,
    /// Reflection restitution in `(0, 1]`.
    pub restitution: f64,
    /// Upper bound on member speed.
    pub max_speed: f64,
    /// Minimum distance kept from the grid edge.
    pub margin: f64,
    /// Radius floor used for collision tests.
    pub min_collision_radius: f64,
}

impl Default for CohesionParams {
    fn default() -> Self {
        Self {
            members: 12,
            orbit_radius: (3.0, 8.0),
            spawn_speed: 0.4,
            size: (2.0, 4.0),
            cohesion_gain: 0.02,
            phase_rate: 0.02,
            orbital_gain: 0.01,
            noise_sigma: 0.05,
            drift: 0.3,
            restitution: 0.8,
            max_speed: 2.0,
            margin: 3.0,
            min_collision_radius: 1.0,
        }
    }
}

impl CohesionParams {
    /// Check every coefficient is in range.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyEnsemble`] for zero members, otherwise
    /// [`ConfigError::InvalidParameter`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.members == 0 {
            return Err(ConfigError::EmptyEnsemble);
        }
        check_range("orbit_radius.min", self.orbit_radius.0, 0.0, 1e6)?;
        check_range("orbit_radius.max", self.orbit_radius.1, self.orbit_radius.0, 1e6)?;
        check_range("size.min", self.size.0, 0.0, 1e6)?;
        check_range("size.max", self.size.1, self.size.0, 1e6)?;
        check_range("spawn_speed", self.spawn_speed, 0.0, 1e6)?;
        check_range("cohesion_gain", self.cohesion_gain, 0.0, 1.0)?;
        check_range("phase_rate", self.phase_rate, -TAU, TAU)?;
        check_range("orbital_gain", self.orbital_gain, 0.0, 1e6)?;
        check_range("noise_sigma", self.noise_sigma, 0.0, 1e6)?;
        check_range("drift", self.drift, 0.0, 1e6)?;
        check_range("restitution", self.restitution, f64::MIN_POSITIVE, 1.0)?;
        check_positive("max_speed", self.max_speed)?;
        check_range("margin", self.margin, 0.0, 1e6)?;
        check_range("min_collision_radius", self.min_collision_radius, 0.0, 1e6)?;
        Ok(())
    }
}

/// One member of a [`Cluster`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterMember {
    /// Position, footprint and velocity.
    pub agent: Agent,
    /// Orbital phase angle in radians; only ever increases.
    pub phase: f64,
    /// Preferred orbit radius, scales the orbital term.
    pub base_radius: f64,
}

/// A group of agents that together form one tracked object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    members: Vec<ClusterMember>,
}

impl Cluster {
    /// Wrap existing members.
    pub fn from_members(members: Vec<ClusterMember>) -> Self {
        Self { members }
    }

    /// Spawn `params.members` agents on a ring around `center`.
    ///
    /// Member `i` starts at angle `i/n · 2π`, at a uniform orbit radius, with
    /// uniform velocity and footprint size drawn from `params`.
    pub fn spawn<R: Rng + ?Sized>(center: (f64, f64), params: &CohesionParams, rng: &mut R) -> Self {
        let n = params.members;
        let members = (0..n)
            .map(|i| {
                let phase = i as f64 / n as f64 * TAU;
                let base_radius = uniform(rng, params.orbit_radius.0, params.orbit_radius.1);
                let vx = uniform(rng, -params.spawn_speed, params.spawn_speed);
                let vy = uniform(rng, -params.spawn_speed, params.spawn_speed);
                let size = uniform(rng, params.size.0, params.size.1);
                ClusterMember {
                    agent: Agent::new(
                        center.0 + base_radius * phase.cos(),
                        center.1 + base_radius * phase.sin(),
                        size,
                    )
                    .with_velocity(vx, vy),
                    phase,
                    base_radius,
                }
            })
            .collect();
        Self { members }
    }

    /// Members in spawn order.
    pub fn members(&self) -> &[ClusterMember] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Copy the member agents out.
    pub fn agents(&self) -> Vec<Agent> {
        self.members.iter().map(|m| m.agent).collect()
    }

    /// Mean member position: the tracked object's location.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        centroid(&self.agents())
    }

    /// Translate every member so the centroid lands on `to`.
    pub fn recenter(&mut self, to: (f64, f64)) {
        if let Some((cx, cy)) = self.centroid() {
            for m in &mut self.members {
                m.agent.x += to.0 - cx;
                m.agent.y += to.1 - cy;
            }
        }
    }
}

/// Dynamics for a [`Cluster`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CohesionModel {
    params: CohesionParams,
}

impl CohesionModel {
    /// Create a model from validated parameters.
    ///
    /// # Errors
    ///
    /// See [`CohesionParams::validate`].
    pub fn new(params: CohesionParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The model's parameters.
    pub fn params(&self) -> &CohesionParams {
        &self.params
    }

    /// Spawn a cluster with this model's spawn parameters.
    pub fn spawn<R: Rng + ?Sized>(&self, center: (f64, f64), rng: &mut R) -> Cluster {
        Cluster::spawn(center, &self.params, rng)
    }

    /// Advance every member by one step.
    pub fn step<Q, R>(&self, cluster: &mut Cluster, world: &Q, rng: &mut R) -> StepSummary
    where
        Q: CollisionQuery + ?Sized,
        R: Rng + ?Sized,
    {
        let mut summary = StepSummary::default();
        let Some((cx, cy)) = cluster.centroid() else {
            return summary;
        };
        let p = &self.params;
        let drift = (uniform(rng, -p.drift, p.drift), uniform(rng, -p.drift, p.drift));
        let dims = world.dims();
        let (w, h) = (dims.width() as f64, dims.height() as f64);

        for m in &mut cluster.members {
            let a = &mut m.agent;
            m.phase += p.phase_rate;
            let orbital = (
                m.base_radius * m.phase.cos() * p.orbital_gain,
                m.base_radius * m.phase.sin() * p.orbital_gain,
            );
            let noise = (normal(rng, 0.0, p.noise_sigma), normal(rng, 0.0, p.noise_sigma));
            a.vx = drift.0 + (cx - a.x) * p.cohesion_gain + orbital.0 + noise.0;
            a.vy = drift.1 + (cy - a.y) * p.cohesion_gain + orbital.1 + noise.1;

            let radius = a.collision_radius(p.min_collision_radius);
            let step = (a.vx, a.vy);
            let candidate = (a.x + step.0, a.y + step.1);
            let res = resolve(a, candidate, step, radius, world);
            if res.reflect_x {
                a.vx = -a.vx * p.restitution;
            }
            if res.reflect_y {
                a.vy = -a.vy * p.restitution;
            }
            clamp_speed(a, p.max_speed);

            a.x = clamp_margin(a.x, p.margin, w);
            a.y = clamp_margin(a.y, p.margin, h);
            summary.record(res.outcome);
        }
        summary
    }
}

/// Clamp into `[margin, extent - margin]`, collapsing to the midpoint when
/// the grid is narrower than twice the margin.
fn clamp_margin(v: f64, margin: f64, extent: f64) -> f64 {
    let (lo, hi) = (margin, extent - margin);
    if lo > hi {
        extent / 2.0
    } else {
        v.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::GridDims;
    use drift_space::ObstacleMap;
    use drift_test_utils::{seeded_rng, OpenArena};

    #[test]
    fn default_params_validate() {
        CohesionParams::default().validate().unwrap();
        let empty = CohesionParams {
            members: 0,
            ..CohesionParams::default()
        };
        assert_eq!(CohesionModel::new(empty), Err(ConfigError::EmptyEnsemble));
    }

    #[test]
    fn spawn_places_members_on_a_ring() {
        let mut rng = seeded_rng(5);
        let params = CohesionParams::default();
        let cluster = Cluster::spawn((50.0, 50.0), &params, &mut rng);
        assert_eq!(cluster.len(), 12);
        for (i, m) in cluster.members().iter().enumerate() {
            let d = (m.agent.x - 50.0).hypot(m.agent.y - 50.0);
            assert!((d - m.base_radius).abs() < 1e-9);
            assert!((3.0..8.0).contains(&m.base_radius));
            assert!((2.0..4.0).contains(&m.agent.radius));
            assert!(m.agent.vx.abs() <= 0.4 && m.agent.vy.abs() <= 0.4);
            assert!((m.phase - i as f64 * TAU / 12.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cluster_stays_coherent_in_open_space() {
        let mut rng = seeded_rng(17);
        let model = CohesionModel::default();
        let mut cluster = model.spawn((50.0, 50.0), &mut rng);
        let world = OpenArena::new(100, 100);
        for _ in 0..300 {
            model.step(&mut cluster, &world, &mut rng);
        }
        let (cx, cy) = cluster.centroid().unwrap();
        for m in cluster.members() {
            assert!((m.agent.x - cx).hypot(m.agent.y - cy) < 20.0);
        }
    }

    #[test]
    fn phase_increases_monotonically() {
        let mut rng = seeded_rng(2);
        let model = CohesionModel::default();
        let mut cluster = model.spawn((50.0, 50.0), &mut rng);
        let before: Vec<f64> = cluster.members().iter().map(|m| m.phase).collect();
        model.step(&mut cluster, &OpenArena::new(100, 100), &mut rng);
        for (m, b) in cluster.members().iter().zip(before) {
            assert!((m.phase - b - 0.02).abs() < 1e-12);
        }
    }

    #[test]
    fn members_respect_margin_and_speed() {
        let mut rng = seeded_rng(23);
        let model = CohesionModel::default();
        let mut map = ObstacleMap::new(GridDims::new(40, 40).unwrap());
        map.paint_line((20, 0), (20, 39), 2);
        let mut cluster = model.spawn((10.0, 20.0), &mut rng);
        for _ in 0..200 {
            model.step(&mut cluster, &map, &mut rng);
            for m in cluster.members() {
                assert!((3.0..=37.0).contains(&m.agent.x));
                assert!((3.0..=37.0).contains(&m.agent.y));
                assert!(m.agent.speed() <= 2.0 + 1e-9);
            }
        }
    }

    #[test]
    fn recenter_moves_centroid() {
        let mut rng = seeded_rng(4);
        let mut cluster = Cluster::spawn((30.0, 30.0), &CohesionParams::default(), &mut rng);
        cluster.recenter((60.0, 10.0));
        let (cx, cy) = cluster.centroid().unwrap();
        assert!((cx - 60.0).abs() < 1e-9 && (cy - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_cluster_step_is_noop() {
        let mut rng = seeded_rng(0);
        let mut cluster = Cluster::default();
        let s = CohesionModel::default().step(&mut cluster, &OpenArena::new(10, 10), &mut rng);
        assert_eq!(s.total(), 0);
        assert!(cluster.centroid().is_none());
    }
}

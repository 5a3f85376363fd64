//! Collision-aware velocity-damped dynamics.
//!
//! One step of [`MotionModel::step`] does, in order:
//!
//! 1. integrate velocity with unit time step, plus an optional thermal term
//! 2. test the candidate position with the collision query
//! 3. if blocked, test the x-only and y-only moves separately; slide along a
//!    free axis and reflect the velocity on blocked ones
//!    (`v := -v * restitution + jitter`)
//! 4. if free, commit the candidate and apply velocity decay and jitter
//! 5. rescale velocity down to `max_speed`, preserving direction
//! 6. optionally random-walk the radius inside `[min, max]`
//!
//! Geometry tests floor the radius at `min_collision_radius`.

use crate::noise::{normal, Perturbation};
use drift_core::error::{check_positive, check_range};
use drift_core::{Agent, CollisionQuery, ConfigError};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ── Parameters ─────────────────────────────────────────────────

/// Bounded random walk applied to the radius after every step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadiusWalk {
    /// Standard deviation of the per-step Gaussian increment.
    pub sigma: f64,
    /// Lower clamp.
    pub min: f64,
    /// Upper clamp.
    pub max: f64,
}

impl Default for RadiusWalk {
    fn default() -> Self {
        Self {
            sigma: 0.02,
            min: 0.5,
            max: 5.0,
        }
    }
}

/// Tunable coefficients of a [`MotionModel`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Factor applied to a reflected velocity component, in `(0, 1]`.
    pub restitution: f64,
    /// Noise added to a reflected component.
    pub bounce_jitter: Perturbation,
    /// Noise added to the candidate position ("thermal" motion).
    pub thermal: Perturbation,
    /// Velocity multiplier after an unblocked move, in `(0, 1]`.
    pub decay: f64,
    /// Noise added to the velocity after an unblocked move.
    pub velocity_jitter: Perturbation,
    /// Upper bound on speed after each step.
    pub max_speed: f64,
    /// Radius floor used for collision tests.
    pub min_collision_radius: f64,
    /// Optional radius random walk.
    pub radius_walk: Option<RadiusWalk>,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            bounce_jitter: Perturbation::None,
            thermal: Perturbation::None,
            decay: 1.0,
            velocity_jitter: Perturbation::None,
            max_speed: 2.0,
            min_collision_radius: 1.0,
            radius_walk: None,
        }
    }
}

impl MotionParams {
    /// Check every coefficient is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("restitution", self.restitution, f64::MIN_POSITIVE, 1.0)?;
        check_range("decay", self.decay, f64::MIN_POSITIVE, 1.0)?;
        check_positive("max_speed", self.max_speed)?;
        check_range("min_collision_radius", self.min_collision_radius, 0.0, 1e6)?;
        self.bounce_jitter.validate("bounce_jitter")?;
        self.thermal.validate("thermal")?;
        self.velocity_jitter.validate("velocity_jitter")?;
        if let Some(walk) = self.radius_walk {
            check_range("radius_walk.sigma", walk.sigma, 0.0, 1e6)?;
            check_range("radius_walk.min", walk.min, 0.0, 1e6)?;
            check_range("radius_walk.max", walk.max, walk.min, 1e6)?;
        }
        Ok(())
    }
}

// ── Outcomes ───────────────────────────────────────────────────

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// What happened to one agent during one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The full candidate move was committed.
    Moved,
    /// The diagonal move was blocked; the agent moved along `axis` only and
    /// the other velocity component was reflected.
    Slid {
        /// The axis the agent moved along.
        axis: Axis,
    },
    /// The agent did not move. Each velocity component whose axis-only
    /// move was also blocked is reflected; at a bare corner, where both
    /// axis-only moves are free, velocity is left as is.
    Blocked,
}

impl StepOutcome {
    /// Whether the agent was stopped on at least one axis.
    pub fn is_collision(&self) -> bool {
        !matches!(self, Self::Moved)
    }
}

/// Per-sweep outcome counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSummary {
    /// Agents that moved freely.
    pub moved: usize,
    /// Agents that slid along one axis.
    pub slid: usize,
    /// Agents that did not move.
    pub blocked: usize,
}

impl StepSummary {
    /// Count one outcome.
    pub fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Moved => self.moved += 1,
            StepOutcome::Slid { .. } => self.slid += 1,
            StepOutcome::Blocked => self.blocked += 1,
        }
    }

    /// Total agents counted.
    pub fn total(&self) -> usize {
        self.moved + self.slid + self.blocked
    }

    /// Agents that hit something this step.
    pub fn collisions(&self) -> usize {
        self.slid + self.blocked
    }
}

/// Axis-separated collision resolution shared by every model.
///
/// Commits whatever part of the move is free and reports which velocity
/// components must be reflected.
pub(crate) struct Resolution {
    pub outcome: StepOutcome,
    pub reflect_x: bool,
    pub reflect_y: bool,
}

/// Test `candidate`, falling back to the axis-only moves.
///
/// `candidate` is the full proposed position, noise included. The
/// axis-only fallbacks step by `axis_step` (the bare velocity) from the
/// current position; a slide commits that noise-free coordinate.
pub(crate) fn resolve<Q: CollisionQuery + ?Sized>(
    agent: &mut Agent,
    candidate: (f64, f64),
    axis_step: (f64, f64),
    radius: f64,
    world: &Q,
) -> Resolution {
    let (nx, ny) = candidate;
    if !world.collides(nx, ny, radius) {
        agent.x = nx;
        agent.y = ny;
        return Resolution {
            outcome: StepOutcome::Moved,
            reflect_x: false,
            reflect_y: false,
        };
    }
    let (ax, ay) = (agent.x + axis_step.0, agent.y + axis_step.1);
    let x_free = !world.collides(ax, agent.y, radius);
    let y_free = !world.collides(agent.x, ay, radius);
    match (x_free, y_free) {
        (true, false) => {
            agent.x = ax;
            Resolution {
                outcome: StepOutcome::Slid { axis: Axis::X },
                reflect_x: false,
                reflect_y: true,
            }
        }
        (false, true) => {
            agent.y = ay;
            Resolution {
                outcome: StepOutcome::Slid { axis: Axis::Y },
                reflect_x: true,
                reflect_y: false,
            }
        }
        (false, false) => Resolution {
            outcome: StepOutcome::Blocked,
            reflect_x: true,
            reflect_y: true,
        },
        // Only the diagonal is blocked: hold position, keep velocity.
        (true, true) => Resolution {
            outcome: StepOutcome::Blocked,
            reflect_x: false,
            reflect_y: false,
        },
    }
}

/// Rescale `(vx, vy)` so its magnitude is at most `max_speed`.
///
/// A non-finite velocity is zeroed.
pub(crate) fn clamp_speed(agent: &mut Agent, max_speed: f64) {
    let speed = agent.speed();
    if !speed.is_finite() {
        agent.vx = 0.0;
        agent.vy = 0.0;
    } else if speed > max_speed {
        let k = max_speed / speed;
        agent.vx *= k;
        agent.vy *= k;
    }
}

// ── Model ──────────────────────────────────────────────────────

/// The per-agent dynamics function.
///
/// # Examples
///
/// ```
/// use drift_core::{Agent, GridDims};
/// use drift_motion::{MotionModel, StepOutcome};
/// use drift_space::ObstacleMap;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let map = ObstacleMap::new(GridDims::new(20, 20).unwrap());
/// let model = MotionModel::bouncing();
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// let mut a = Agent::new(10.0, 10.0, 1.0).with_velocity(1.0, 0.5);
/// assert_eq!(model.step(&mut a, &map, &mut rng), StepOutcome::Moved);
/// assert_eq!(a.position(), (11.0, 10.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MotionModel {
    params: MotionParams,
}

impl Default for MotionModel {
    fn default() -> Self {
        Self::bouncing()
    }
}

impl MotionModel {
    /// Create a model from validated parameters.
    ///
    /// # Errors
    ///
    /// See [`MotionParams::validate`].
    pub fn new(params: MotionParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Start building a model from the default parameters.
    pub fn builder() -> MotionModelBuilder {
        MotionModelBuilder {
            params: MotionParams::default(),
        }
    }

    /// Plain reflect-and-damp dynamics: restitution 0.8, max speed 2.0, no
    /// noise.
    pub fn bouncing() -> Self {
        Self {
            params: MotionParams::default(),
        }
    }

    /// Brownian ensemble dynamics with size uncertainty.
    ///
    /// Thermal σ=0.2, restitution 0.7 with bounce jitter σ=0.1, decay 0.98
    /// with velocity jitter σ=0.05, max speed 1.5, radius walk σ=0.02 in
    /// `[0.5, 5.0]`.
    pub fn diffuse() -> Self {
        Self {
            params: MotionParams {
                restitution: 0.7,
                bounce_jitter: Perturbation::Gaussian { sigma: 0.1 },
                thermal: Perturbation::Gaussian { sigma: 0.2 },
                decay: 0.98,
                velocity_jitter: Perturbation::Gaussian { sigma: 0.05 },
                max_speed: 1.5,
                min_collision_radius: 1.0,
                radius_walk: Some(RadiusWalk::default()),
            },
        }
    }

    /// The tracked target: restitution 0.9, `U(±0.1)` jitter on every
    /// velocity component after a free move and on each reflected one,
    /// max speed 2.0.
    pub fn target() -> Self {
        Self {
            params: MotionParams {
                restitution: 0.9,
                bounce_jitter: Perturbation::Uniform { half_range: 0.1 },
                velocity_jitter: Perturbation::Uniform { half_range: 0.1 },
                ..MotionParams::default()
            },
        }
    }

    /// The model's parameters.
    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Advance one agent by one step.
    pub fn step<Q, R>(&self, agent: &mut Agent, world: &Q, rng: &mut R) -> StepOutcome
    where
        Q: CollisionQuery + ?Sized,
        R: Rng + ?Sized,
    {
        let p = &self.params;
        let radius = agent.collision_radius(p.min_collision_radius);
        let (tx, ty) = p.thermal.sample2(rng);
        let step = (agent.vx, agent.vy);
        let candidate = (agent.x + step.0 + tx, agent.y + step.1 + ty);

        let res = resolve(agent, candidate, step, radius, world);
        if res.outcome == StepOutcome::Moved {
            let (jx, jy) = p.velocity_jitter.sample2(rng);
            agent.vx = agent.vx * p.decay + jx;
            agent.vy = agent.vy * p.decay + jy;
        } else {
            if res.reflect_x {
                agent.vx = -agent.vx * p.restitution + p.bounce_jitter.sample(rng);
            }
            if res.reflect_y {
                agent.vy = -agent.vy * p.restitution + p.bounce_jitter.sample(rng);
            }
        }

        clamp_speed(agent, p.max_speed);

        if let Some(walk) = p.radius_walk {
            agent.radius = normal(rng, agent.radius, walk.sigma).clamp(walk.min, walk.max);
        }
        res.outcome
    }

    /// Advance every member of an ensemble, in order.
    pub fn step_all<Q, R>(&self, agents: &mut [Agent], world: &Q, rng: &mut R) -> StepSummary
    where
        Q: CollisionQuery + ?Sized,
        R: Rng + ?Sized,
    {
        let mut summary = StepSummary::default();
        for agent in agents.iter_mut() {
            summary.record(self.step(agent, world, rng));
        }
        summary
    }
}

/// Builder for [`MotionModel`].
///
/// Starts from [`MotionParams::default`]; `build()` validates.
#[derive(Clone, Debug)]
pub struct MotionModelBuilder {
    params: MotionParams,
}

impl MotionModelBuilder {
    /// Reflection restitution in `(0, 1]` (default 0.8).
    pub fn restitution(mut self, restitution: f64) -> Self {
        self.params.restitution = restitution;
        self
    }

    /// Noise added to reflected components (default none).
    pub fn bounce_jitter(mut self, jitter: Perturbation) -> Self {
        self.params.bounce_jitter = jitter;
        self
    }

    /// Thermal position noise (default none).
    pub fn thermal(mut self, thermal: Perturbation) -> Self {
        self.params.thermal = thermal;
        self
    }

    /// Velocity decay after a free move, in `(0, 1]` (default 1.0).
    pub fn decay(mut self, decay: f64) -> Self {
        self.params.decay = decay;
        self
    }

    /// Velocity noise after a free move (default none).
    pub fn velocity_jitter(mut self, jitter: Perturbation) -> Self {
        self.params.velocity_jitter = jitter;
        self
    }

    /// Maximum speed (default 2.0).
    pub fn max_speed(mut self, max_speed: f64) -> Self {
        self.params.max_speed = max_speed;
        self
    }

    /// Radius floor for collision tests (default 1.0).
    pub fn min_collision_radius(mut self, radius: f64) -> Self {
        self.params.min_collision_radius = radius;
        self
    }

    /// Enable the radius random walk.
    pub fn radius_walk(mut self, walk: RadiusWalk) -> Self {
        self.params.radius_walk = Some(walk);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// See [`MotionParams::validate`].
    pub fn build(self) -> Result<MotionModel, ConfigError> {
        MotionModel::new(self.params)
    }
}

//! The simulation driver.
//!
//! [`Simulation`] owns one random generator, the shared wall map, an agent
//! ensemble and the "true" target. It exposes the function-shaped surface a
//! filtering library drives ([`FilterHooks`]) and a self-contained
//! [`tick`](Simulation::tick) for headless runs.

use crossbeam_channel::Receiver;
use drift_core::{centroid, Agent, GridDims, TickId};
use drift_motion::{Cluster, CohesionModel, MotionModel, Prior, StepSummary};
use drift_obs::{OccupancyField, OccupancyRenderer};
use drift_space::ObstacleMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{EngineError, SimConfig, TargetConfig};
use crate::scenario::Scenario;
use crate::walls::{wall_queue, WallCommand, WallHandle, WallSender};

// ── FilterHooks ────────────────────────────────────────────────────

/// The dynamics / observation pair a particle filter calls into.
pub trait FilterHooks {
    /// Advance every ensemble member one step in place.
    fn dynamics(&mut self, ensemble: &mut [Agent]) -> StepSummary;

    /// One observation field per ensemble member, in order.
    fn observe(&self, ensemble: &[Agent]) -> Vec<OccupancyField>;
}

// ── Reports ────────────────────────────────────────────────────────

/// What [`Simulation::reset`] reinitializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResetScope {
    /// Resample the ensemble from the prior.
    Agents,
    /// Respawn the target at the grid center.
    Target,
    /// Restore the configured wall scenario.
    Walls,
    /// All of the above, and rewind the tick counter.
    All,
}

/// Summary of one [`Simulation::tick`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickReport {
    /// Index of the tick that just completed.
    pub tick: TickId,
    /// Queued wall commands applied at the start of the tick.
    pub wall_commands: usize,
    /// Blocked cells after wall commands were applied.
    pub blocked_cells: usize,
    /// Ensemble motion outcomes.
    pub ensemble: StepSummary,
    /// Target motion outcomes.
    pub target: StepSummary,
    /// Non-zero cells in the target's observation.
    pub lit_cells: usize,
    /// Target position (cluster centroid for a cluster target).
    pub target_position: Option<(f64, f64)>,
    /// Mean ensemble position.
    pub ensemble_mean: Option<(f64, f64)>,
    /// Distance between `ensemble_mean` and `target_position`.
    pub tracking_error: Option<f64>,
}

// ── Target ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Target {
    Blob(Agent),
    Cluster(Cluster),
}

impl Target {
    fn agents(&self) -> Vec<Agent> {
        match self {
            Self::Blob(a) => vec![*a],
            Self::Cluster(c) => c.agents(),
        }
    }

    fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::Blob(a) => Some(a.position()),
            Self::Cluster(c) => c.centroid(),
        }
    }
}

// ── Simulation ─────────────────────────────────────────────────────

/// A complete, seeded simulation instance.
///
/// # Examples
///
/// ```
/// use drift_engine::{Scenario, SimConfig, Simulation};
///
/// let cfg = SimConfig {
///     width: 60,
///     height: 60,
///     ensemble_size: 20,
///     scenario: Scenario::Obstacles,
///     ..SimConfig::default()
/// };
/// let mut sim = Simulation::new(cfg).unwrap();
/// let report = sim.tick();
/// assert_eq!(report.tick.0, 1);
/// assert_eq!(report.ensemble.total(), 20);
/// ```
pub struct Simulation {
    config: SimConfig,
    dims: GridDims,
    walls: WallHandle,
    wall_tx: WallSender,
    wall_rx: Receiver<WallCommand>,
    rng: ChaCha8Rng,
    motion: MotionModel,
    target_motion: MotionModel,
    cohesion: Option<CohesionModel>,
    renderer: OccupancyRenderer,
    prior: Prior,
    ensemble: Vec<Agent>,
    target: Target,
    tick: TickId,
}

impl Simulation {
    /// Validate `config` and build the simulation: paint the scenario,
    /// sample the ensemble, spawn the target.
    ///
    /// # Errors
    ///
    /// [`EngineError::Config`] if validation fails; nothing is built.
    pub fn new(config: SimConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let dims = config.dims()?;
        let motion = MotionModel::new(config.motion)?;
        let renderer = OccupancyRenderer::new(config.render)?;
        let prior = Prior::new(dims, config.prior)?;
        let cohesion = match config.target {
            TargetConfig::Cluster(params) => Some(CohesionModel::new(params)?),
            TargetConfig::Blob { .. } => None,
        };

        let mut map = ObstacleMap::new(dims);
        config.scenario.apply(&mut map, config.wall_thickness);
        let (wall_tx, wall_rx) = wall_queue(config.wall_queue_capacity);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let ensemble = prior.sample_ensemble(config.ensemble_size, &mut rng)?;
        let target = spawn_target(&config.target, cohesion.as_ref(), dims, &mut rng);

        info!(
            width = dims.width(),
            height = dims.height(),
            ensemble = config.ensemble_size,
            seed = config.seed,
            scenario = %config.scenario,
            blocked = map.blocked_count(),
            "simulation created"
        );

        Ok(Self {
            dims,
            walls: WallHandle::from_map(map),
            wall_tx,
            wall_rx,
            rng,
            motion,
            target_motion: MotionModel::target(),
            cohesion,
            renderer,
            prior,
            ensemble,
            target,
            tick: TickId::default(),
            config,
        })
    }

    // ── Accessors ──────────────────────────────────────────────

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of completed ticks.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// A handle for painting and reading walls from other threads.
    pub fn wall_handle(&self) -> WallHandle {
        self.walls.clone()
    }

    /// A sender for queueing wall commands from other threads.
    pub fn wall_sender(&self) -> WallSender {
        self.wall_tx.clone()
    }

    /// The owned ensemble.
    pub fn ensemble(&self) -> &[Agent] {
        &self.ensemble
    }

    /// Replace the owned ensemble, e.g. after the filter resamples it.
    ///
    /// # Errors
    ///
    /// [`EngineError::EnsembleSizeMismatch`] if the size differs from the
    /// configured ensemble size.
    pub fn set_ensemble(&mut self, ensemble: Vec<Agent>) -> Result<(), EngineError> {
        if ensemble.len() != self.config.ensemble_size {
            return Err(EngineError::EnsembleSizeMismatch {
                expected: self.config.ensemble_size,
                actual: ensemble.len(),
            });
        }
        self.ensemble = ensemble;
        Ok(())
    }

    /// The target's agents: one for a blob, every member for a cluster.
    pub fn target_agents(&self) -> Vec<Agent> {
        self.target.agents()
    }

    /// The target's position.
    pub fn target_position(&self) -> Option<(f64, f64)> {
        self.target.position()
    }

    // ── Driver surface ─────────────────────────────────────────

    /// Advance `ensemble` one step with the configured motion model.
    ///
    /// Holds the wall lock for the whole sweep.
    pub fn dynamics(&mut self, ensemble: &mut [Agent]) -> StepSummary {
        let map = self.walls.lock();
        self.motion.step_all(ensemble, &*map, &mut self.rng)
    }

    /// Render each member of `ensemble` into its own field.
    pub fn observe(&self, ensemble: &[Agent]) -> Vec<OccupancyField> {
        let map = self.walls.lock();
        self.renderer.render_each(ensemble, &*map)
    }

    /// Render the target: the shared "true" observation.
    pub fn observe_truth(&self) -> OccupancyField {
        let map = self.walls.lock();
        self.renderer.render(&self.target.agents(), &*map)
    }

    /// Stamp the wall brush at `(x, y)`. Returns newly blocked cells.
    pub fn paint_point(&self, x: i32, y: i32) -> usize {
        self.walls
            .apply(WallCommand::Point((x, y)), self.config.wall_thickness)
    }

    /// Paint a wall segment. Returns newly blocked cells.
    pub fn paint_line(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> usize {
        self.walls.apply(
            WallCommand::Line((x1, y1), (x2, y2)),
            self.config.wall_thickness,
        )
    }

    /// Remove every wall.
    pub fn clear_walls(&self) {
        self.walls.apply(WallCommand::Clear, 0);
        info!("walls cleared");
    }

    /// Replace the walls with a preset layout.
    pub fn apply_scenario(&self, scenario: Scenario) -> usize {
        let blocked = self
            .walls
            .apply(WallCommand::Scenario(scenario), self.config.wall_thickness);
        info!(%scenario, blocked, "scenario applied");
        blocked
    }

    /// Apply a wall command immediately.
    pub fn apply_wall_command(&self, command: WallCommand) -> usize {
        self.walls.apply(command, self.config.wall_thickness)
    }

    /// Reinitialize part or all of the simulation.
    ///
    /// The generator is not reseeded, so successive resets draw fresh
    /// states.
    pub fn reset(&mut self, scope: ResetScope) {
        if matches!(scope, ResetScope::Walls | ResetScope::All) {
            let blocked = self
                .config
                .scenario
                .apply(&mut self.walls.lock(), self.config.wall_thickness);
            debug!(blocked, "walls reset");
        }
        if matches!(scope, ResetScope::Agents | ResetScope::All) {
            self.prior.resample(&mut self.ensemble, &mut self.rng);
        }
        if matches!(scope, ResetScope::Target | ResetScope::All) {
            self.target = spawn_target(
                &self.config.target,
                self.cohesion.as_ref(),
                self.dims,
                &mut self.rng,
            );
        }
        if scope == ResetScope::All {
            self.tick = TickId::default();
        }
        info!(?scope, "simulation reset");
    }

    /// Run one full tick.
    ///
    /// Under a single wall lock: apply queued wall commands, step the
    /// target, step the ensemble, render the target's observation.
    pub fn tick(&mut self) -> TickReport {
        let mut map = self.walls.lock();

        let mut wall_commands = 0;
        for cmd in self.wall_rx.try_iter() {
            cmd.apply(&mut map, self.config.wall_thickness);
            wall_commands += 1;
        }

        let mut target = StepSummary::default();
        match &mut self.target {
            Target::Blob(a) => target.record(self.target_motion.step(a, &*map, &mut self.rng)),
            Target::Cluster(c) => {
                if let Some(model) = &self.cohesion {
                    target = model.step(c, &*map, &mut self.rng);
                }
            }
        }
        let ensemble = self
            .motion
            .step_all(&mut self.ensemble, &*map, &mut self.rng);
        let truth = self.renderer.render(&self.target.agents(), &*map);
        let blocked_cells = map.blocked_count();
        drop(map);

        self.tick = self.tick.next();
        let target_position = self.target.position();
        let ensemble_mean = centroid(&self.ensemble);
        let tracking_error = match (target_position, ensemble_mean) {
            (Some(t), Some(m)) => Some((t.0 - m.0).hypot(t.1 - m.1)),
            _ => None,
        };
        let report = TickReport {
            tick: self.tick,
            wall_commands,
            blocked_cells,
            ensemble,
            target,
            lit_cells: truth.lit_count(),
            target_position,
            ensemble_mean,
            tracking_error,
        };
        debug!(
            tick = report.tick.0,
            moved = ensemble.moved,
            slid = ensemble.slid,
            blocked = ensemble.blocked,
            lit = report.lit_cells,
            wall_commands,
            "tick complete"
        );
        report
    }
}

impl FilterHooks for Simulation {
    fn dynamics(&mut self, ensemble: &mut [Agent]) -> StepSummary {
        Simulation::dynamics(self, ensemble)
    }

    fn observe(&self, ensemble: &[Agent]) -> Vec<OccupancyField> {
        Simulation::observe(self, ensemble)
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("dims", &self.dims)
            .field("tick", &self.tick)
            .field("ensemble", &self.ensemble.len())
            .field("seed", &self.config.seed)
            .finish_non_exhaustive()
    }
}

fn spawn_target(
    config: &TargetConfig,
    cohesion: Option<&CohesionModel>,
    dims: GridDims,
    rng: &mut ChaCha8Rng,
) -> Target {
    let center = dims.center();
    match (config, cohesion) {
        (TargetConfig::Cluster(_), Some(model)) => Target::Cluster(model.spawn(center, rng)),
        (
            TargetConfig::Blob {
                radius_min,
                radius_max,
                spawn_speed,
            },
            _,
        ) => {
            let vx = drift_motion::noise::uniform(rng, -spawn_speed, *spawn_speed);
            let vy = drift_motion::noise::uniform(rng, -spawn_speed, *spawn_speed);
            let radius = drift_motion::noise::uniform(rng, *radius_min, *radius_max);
            Target::Blob(Agent::new(center.0, center.1, radius).with_velocity(vx, vy))
        }
        (TargetConfig::Cluster(params), None) => {
            Target::Cluster(Cluster::spawn(center, params, rng))
        }
    }
}

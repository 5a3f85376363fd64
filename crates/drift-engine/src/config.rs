//! Simulation configuration and engine errors.

use std::error::Error;
use std::fmt;

use drift_core::error::{check_positive, check_range};
use drift_core::{ConfigError, GridDims};
use drift_motion::{CohesionParams, MotionParams, PriorConfig};
use drift_obs::RenderConfig;
use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

// ── EngineError ────────────────────────────────────────────────────

/// Errors raised by the simulation driver.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// Configuration validation failed.
    Config(ConfigError),
    /// A JSON configuration could not be parsed.
    Parse {
        /// Parser message.
        reason: String,
    },
    /// A replacement ensemble has the wrong number of members.
    EnsembleSizeMismatch {
        /// The configured ensemble size.
        expected: usize,
        /// The size that was supplied.
        actual: usize,
    },
    /// The wall command queue is at capacity.
    WallQueueFull {
        /// The queue's capacity.
        capacity: usize,
    },
    /// The simulation owning the wall command queue has been dropped.
    WallQueueClosed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Parse { reason } => write!(f, "config parse error: {reason}"),
            Self::EnsembleSizeMismatch { expected, actual } => {
                write!(f, "ensemble must have {expected} members, got {actual}")
            }
            Self::WallQueueFull { capacity } => {
                write!(f, "wall command queue is full ({capacity} pending)")
            }
            Self::WallQueueClosed => write!(f, "wall command queue is closed"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── TargetConfig ───────────────────────────────────────────────────

/// What the "true" tracked object is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetConfig {
    /// One disk with the [`target`](drift_motion::MotionModel::target)
    /// dynamics, spawned at the grid center.
    Blob {
        /// Smallest spawn radius.
        radius_min: f64,
        /// Largest spawn radius.
        radius_max: f64,
        /// Half-range of the uniform spawn velocity.
        spawn_speed: f64,
    },
    /// A cohesive cluster of small disks.
    Cluster(CohesionParams),
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self::Blob {
            radius_min: 3.0,
            radius_max: 8.0,
            spawn_speed: 0.5,
        }
    }
}

impl TargetConfig {
    /// Check the target parameters.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Blob {
                radius_min,
                radius_max,
                spawn_speed,
            } => {
                check_range("target.radius_min", *radius_min, 0.0, 1e6)?;
                check_range("target.radius_max", *radius_max, *radius_min, 1e6)?;
                check_range("target.spawn_speed", *spawn_speed, 0.0, 1e6)
            }
            Self::Cluster(params) => params.validate(),
        }
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Largest accepted wall brush thickness.
pub const MAX_WALL_THICKNESS: u32 = 64;

/// Complete description of a simulation.
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```
/// use drift_engine::SimConfig;
///
/// let cfg = SimConfig::from_json_str(r#"{ "width": 64, "ensemble_size": 40 }"#).unwrap();
/// assert_eq!(cfg.width, 64);
/// assert_eq!(cfg.height, 100);
/// assert_eq!(cfg.ensemble_size, 40);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Number of ensemble members.
    pub ensemble_size: usize,
    /// Brush thickness for painted walls.
    pub wall_thickness: u32,
    /// Screen pixels per grid cell, used by [`WallBrush`](crate::WallBrush).
    pub pointer_scale: f64,
    /// Seed of the simulation's random generator.
    pub seed: u64,
    /// Ensemble dynamics.
    pub motion: MotionParams,
    /// The tracked object.
    pub target: TargetConfig,
    /// Observation rendering.
    pub render: RenderConfig,
    /// Initial ensemble distribution.
    pub prior: PriorConfig,
    /// Walls painted at construction and on wall resets.
    pub scenario: Scenario,
    /// Capacity of the cross-thread wall command queue.
    pub wall_queue_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            ensemble_size: 150,
            wall_thickness: 2,
            pointer_scale: 8.0,
            seed: 0,
            motion: MotionParams::default(),
            target: TargetConfig::default(),
            render: RenderConfig::default(),
            prior: PriorConfig::default(),
            scenario: Scenario::Empty,
            wall_queue_capacity: 1024,
        }
    }
}

impl SimConfig {
    /// Grid dimensions.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidDimensions`] for a zero side.
    pub fn dims(&self) -> Result<GridDims, ConfigError> {
        GridDims::new(self.width, self.height)
    }

    /// Check the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dims()?;
        if self.ensemble_size == 0 {
            return Err(ConfigError::EmptyEnsemble);
        }
        if self.wall_thickness > MAX_WALL_THICKNESS {
            return Err(ConfigError::parameter(
                "wall_thickness",
                format!("must be at most {MAX_WALL_THICKNESS}, got {}", self.wall_thickness),
            ));
        }
        if self.wall_queue_capacity == 0 {
            return Err(ConfigError::parameter(
                "wall_queue_capacity",
                "must be at least 1",
            ));
        }
        check_positive("pointer_scale", self.pointer_scale)?;
        self.motion.validate()?;
        self.target.validate()?;
        self.render.validate()?;
        self.prior.validate()?;
        Ok(())
    }

    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`EngineError::Parse`] on malformed JSON; the result is not
    /// validated.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::Parse {
            reason: e.to_string(),
        })
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`EngineError::Parse`] if a float field is not representable in
    /// JSON.
    pub fn to_json_string(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::Parse {
            reason: e.to_string(),
        })
    }
}

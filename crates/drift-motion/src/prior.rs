//! Randomized initial ensembles.

use crate::noise::{normal, uniform};
use drift_core::error::check_range;
use drift_core::{Agent, ConfigError, GridDims};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Distribution parameters for [`Prior`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorConfig {
    /// Position standard deviation as a fraction of each grid side.
    pub spread: f64,
    /// Smallest sampled radius.
    pub radius_min: f64,
    /// Largest sampled radius.
    pub radius_max: f64,
    /// Per-axis velocity standard deviation.
    pub velocity_sigma: f64,
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            spread: 0.25,
            radius_min: 1.0,
            radius_max: 5.0,
            velocity_sigma: 0.5,
        }
    }
}

impl PriorConfig {
    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a negative spread or
    /// sigma, or an inverted radius range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("prior.spread", self.spread, 0.0, 1e6)?;
        check_range("prior.radius_min", self.radius_min, 0.0, 1e6)?;
        check_range("prior.radius_max", self.radius_max, self.radius_min, 1e6)?;
        check_range("prior.velocity_sigma", self.velocity_sigma, 0.0, 1e6)?;
        Ok(())
    }
}

/// Initial-state sampler for an ensemble.
///
/// Positions are Gaussian around the grid center (σ = `spread` × side) and
/// clamped into the grid, radii uniform in `[radius_min, radius_max]`,
/// velocities Gaussian per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Prior {
    dims: GridDims,
    config: PriorConfig,
}

impl Prior {
    /// Create a sampler for `dims`.
    ///
    /// # Errors
    ///
    /// See [`PriorConfig::validate`].
    pub fn new(dims: GridDims, config: PriorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { dims, config })
    }

    /// The sampler's configuration.
    pub fn config(&self) -> &PriorConfig {
        &self.config
    }

    /// Draw one agent.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Agent {
        let c = &self.config;
        let (w, h) = (self.dims.width() as f64, self.dims.height() as f64);
        let (cx, cy) = self.dims.center();
        let x = normal(rng, cx, w * c.spread).clamp(0.0, w - 1.0);
        let y = normal(rng, cy, h * c.spread).clamp(0.0, h - 1.0);
        let radius = if c.radius_max > c.radius_min {
            uniform(rng, c.radius_min, c.radius_max)
        } else {
            c.radius_min
        };
        let vx = normal(rng, 0.0, c.velocity_sigma);
        let vy = normal(rng, 0.0, c.velocity_sigma);
        Agent::new(x, y, radius).with_velocity(vx, vy)
    }

    /// Draw `count` agents.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyEnsemble`] when `count` is zero.
    pub fn sample_ensemble<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Agent>, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyEnsemble);
        }
        Ok((0..count).map(|_| self.sample(rng)).collect())
    }

    /// Resample every member of `agents` in place.
    pub fn resample<R: Rng + ?Sized>(&self, agents: &mut [Agent], rng: &mut R) {
        for a in agents.iter_mut() {
            *a = self.sample(rng);
        }
    }
}

//! Disk stamping of agents onto an [`OccupancyField`].

use crate::field::OccupancyField;
use drift_core::error::check_range;
use drift_core::{Agent, CollisionQuery, ConfigError};
use drift_space::{EdgeBehavior, Neighborhood};
use serde::{Deserialize, Serialize};

/// How a footprint is written into the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Cells within the radius are set to 1.
    #[default]
    Binary,
    /// Cells within the radius get `1 - d/radius`; overlaps keep the max.
    Soft,
}

/// Renderer settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Footprint shading.
    pub mode: RenderMode,
    /// Skip agents that the collision query reports as colliding.
    pub suppress_colliding: bool,
    /// Floor applied to any positive radius before stamping and before the
    /// suppression test.
    pub min_radius: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Binary,
            suppress_colliding: true,
            min_radius: 1.0,
        }
    }
}

impl RenderConfig {
    /// Check the radius floor.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidParameter`] for a negative or non-finite floor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("render.min_radius", self.min_radius, 0.0, 1e6)
    }
}

/// Rasterizes agent ensembles into occupancy fields.
///
/// Stamps are disks around each agent's continuous center, clipped at the
/// grid edge. Agents centered off-grid and agents with a radius `<= 0` (or
/// NaN) contribute nothing. Stamps combine by maximum, so overlapping
/// agents never saturate a cell beyond 1.
///
/// # Examples
///
/// ```
/// use drift_core::{Agent, GridDims};
/// use drift_obs::{OccupancyRenderer, RenderConfig};
/// use drift_space::ObstacleMap;
///
/// let map = ObstacleMap::new(GridDims::new(10, 10).unwrap());
/// let renderer = OccupancyRenderer::new(RenderConfig::default()).unwrap();
/// let field = renderer.render(&[Agent::new(5.0, 5.0, 2.0)], &map);
/// assert_eq!(field.lit_count(), 13);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OccupancyRenderer {
    config: RenderConfig,
}

impl OccupancyRenderer {
    /// Create a renderer.
    ///
    /// # Errors
    ///
    /// See [`RenderConfig::validate`].
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The renderer's settings.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the union of every agent's footprint into a fresh field.
    pub fn render<Q: CollisionQuery + ?Sized>(&self, agents: &[Agent], world: &Q) -> OccupancyField {
        let mut field = OccupancyField::zeros(world.dims());
        self.render_into(&mut field, agents, world);
        field
    }

    /// Clear `field` and render `agents` into it.
    ///
    /// Returns the number of agents actually stamped.
    pub fn render_into<Q: CollisionQuery + ?Sized>(
        &self,
        field: &mut OccupancyField,
        agents: &[Agent],
        world: &Q,
    ) -> usize {
        field.clear();
        agents
            .iter()
            .filter(|a| self.stamp(field, a, world))
            .count()
    }

    /// Render each agent into its own field, in order.
    pub fn render_each<Q: CollisionQuery + ?Sized>(
        &self,
        agents: &[Agent],
        world: &Q,
    ) -> Vec<OccupancyField> {
        agents
            .iter()
            .map(|a| self.render(std::slice::from_ref(a), world))
            .collect()
    }

    /// Whether `agent` would be stamped at all.
    pub fn is_visible<Q: CollisionQuery + ?Sized>(&self, agent: &Agent, world: &Q) -> bool {
        self.effective_radius(agent)
            .is_some_and(|r| self.passes(agent, r, world))
    }

    fn effective_radius(&self, agent: &Agent) -> Option<f64> {
        // NaN fails the comparison as well.
        if agent.radius > 0.0 {
            Some(agent.radius.max(self.config.min_radius))
        } else {
            None
        }
    }

    fn passes<Q: CollisionQuery + ?Sized>(&self, agent: &Agent, radius: f64, world: &Q) -> bool {
        world.dims().contains_point(agent.x, agent.y)
            && !(self.config.suppress_colliding && world.collides(agent.x, agent.y, radius))
    }

    fn stamp<Q: CollisionQuery + ?Sized>(
        &self,
        field: &mut OccupancyField,
        agent: &Agent,
        world: &Q,
    ) -> bool {
        let Some(radius) = self.effective_radius(agent) else {
            return false;
        };
        if !self.passes(agent, radius, world) {
            return false;
        }
        let hood = Neighborhood::disk(field.dims(), agent.position(), radius, EdgeBehavior::Absorb);
        for n in hood.iter() {
            let value = match self.config.mode {
                RenderMode::Binary => 1.0,
                RenderMode::Soft => (1.0 - n.distance / radius) as f32,
            };
            field.raise(n.cell.0, n.cell.1, value);
        }
        true
    }
}

//! Drift: a collision-aware particle simulation for exercising particle
//! filters.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Drift sub-crates. For most users, adding `drift` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use drift::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig {
//!     width: 32,
//!     height: 32,
//!     ensemble_size: 8,
//!     scenario: Scenario::Traffic,
//!     ..SimConfig::default()
//! })
//! .unwrap();
//!
//! // Paint a short wall, then let a filter-owned ensemble move and look.
//! sim.paint_line(2, 28, 12, 28);
//! let mut particles = sim.ensemble().to_vec();
//! let summary = sim.dynamics(&mut particles);
//! assert_eq!(summary.total(), 8);
//! let fields = sim.observe(&particles);
//! assert_eq!(fields.len(), 8);
//!
//! let report = sim.tick();
//! assert_eq!(report.tick, TickId(1));
//! ```
//!
//! The building blocks are usable without the driver:
//!
//! ```rust
//! use drift::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut map = ObstacleMap::new(GridDims::new(10, 10).unwrap());
//! map.paint_point(5, 5, 0);
//! assert!(map.collides(5.0, 4.0, 1.0));
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
//! let mut agent = Agent::new(2.0, 2.0, 1.0).with_velocity(1.0, 0.0);
//! let outcome = MotionModel::bouncing().step(&mut agent, &map, &mut rng);
//! assert_eq!(outcome, StepOutcome::Moved);
//! assert_eq!(agent.position(), (3.0, 2.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `drift-core` | Grid dimensions, agents, tick IDs, errors, `CollisionQuery` |
//! | [`space`] | `drift-space` | Obstacle map, collision test, neighborhoods, line rasterization |
//! | [`motion`] | `drift-motion` | Motion presets, cohesive clusters, priors, noise |
//! | [`obs`] | `drift-obs` | Occupancy fields and the renderer |
//! | [`engine`] | `drift-engine` | Simulation driver, wall input, scenarios, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`drift-core`).
///
/// Contains [`types::GridDims`], [`types::Agent`], [`types::ConfigError`]
/// and the [`types::CollisionQuery`] trait every model reads walls through.
pub use drift_core as types;

/// Obstacle geometry (`drift-space`).
///
/// [`space::ObstacleMap`] with its point and line painting, the
/// [`space::collides`] test, and the [`space::Neighborhood`] iterator.
pub use drift_space as space;

/// Motion models (`drift-motion`).
///
/// [`motion::MotionModel`] presets, [`motion::CohesionModel`] clusters and
/// the [`motion::Prior`] used to seed ensembles.
pub use drift_motion as motion;

/// Occupancy rendering (`drift-obs`).
///
/// Render agents into [`obs::OccupancyField`]s with an
/// [`obs::OccupancyRenderer`].
pub use drift_obs as obs;

/// Simulation driver (`drift-engine`).
///
/// [`engine::Simulation`] and the [`engine::FilterHooks`] surface, shared
/// walls through [`engine::WallHandle`] and [`engine::WallSender`].
pub use drift_engine as engine;

/// Common imports for typical Drift usage.
///
/// ```rust
/// use drift::prelude::*;
/// ```
///
/// This imports the most frequently used types: the simulation driver and
/// its configuration, agents, the obstacle map, motion models, and the
/// renderer.
pub mod prelude {
    // Core types and traits
    pub use drift_core::{Agent, Cell, CollisionQuery, GridDims, TickId};

    // Errors
    pub use drift_core::ConfigError;
    pub use drift_engine::EngineError;

    // Space
    pub use drift_space::{EdgeBehavior, ObstacleMap};

    // Motion
    pub use drift_motion::{
        CohesionModel, CohesionParams, MotionModel, MotionParams, Perturbation, Prior, PriorConfig,
        StepOutcome, StepSummary,
    };

    // Observation
    pub use drift_obs::{OccupancyField, OccupancyRenderer, RenderConfig, RenderMode};

    // Engine
    pub use drift_engine::{
        FilterHooks, ResetScope, Scenario, SimConfig, Simulation, TargetConfig, TickReport,
        WallBrush, WallCommand, WallHandle, WallSender,
    };
}

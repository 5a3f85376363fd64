//! Motion models for Drift agents.
//!
//! Every model reads wall geometry only through
//! [`CollisionQuery`](drift_core::CollisionQuery) and draws randomness only
//! from a caller-supplied generator, so a step is a pure function of the
//! agent, the map and the RNG state.
//!
//! - [`MotionModel`]: per-agent integrate / test / reflect-and-damp step,
//!   with [`presets`](MotionModel::bouncing) for the bundled dynamics
//! - [`CohesionModel`]: a cluster of agents held together by a
//!   centroid-seeking force and an orbital term
//! - [`Prior`]: randomized initial ensembles
//! - [`noise`]: Box-Muller Gaussian samples and [`Perturbation`] terms

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cohesion;
pub mod model;
pub mod noise;
pub mod prior;

pub use cohesion::{Cluster, ClusterMember, CohesionModel, CohesionParams};
pub use model::{
    Axis, MotionModel, MotionModelBuilder, MotionParams, RadiusWalk, StepOutcome, StepSummary,
};
pub use noise::Perturbation;
pub use prior::{Prior, PriorConfig};

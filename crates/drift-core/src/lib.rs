//! Core types and traits for the Drift particle simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the Drift workspace:
//! grid dimensions, the agent record, tick identifiers, configuration
//! errors, and the collision query trait that decouples the motion and
//! observation models from the obstacle map implementation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod grid;
pub mod id;
pub mod traits;

pub use agent::{centroid, Agent};
pub use error::ConfigError;
pub use grid::{Cell, GridDims};
pub use id::TickId;
pub use traits::CollisionQuery;

//! Obstacle geometry for Drift simulations.
//!
//! This crate owns everything the simulation knows about walls:
//!
//! - [`ObstacleMap`]: the persistent boolean grid of blocked cells, painted
//!   by point stamps and thick lines
//! - [`Neighborhood`]: a lazy, restartable sequence of grid cells inside a
//!   square or disk footprint, with configurable [`EdgeBehavior`]
//! - [`LineCells`]: Bresenham rasterization of a segment
//! - [`collides`]: the square-neighborhood collision test used by the
//!   motion and observation models through
//!   [`CollisionQuery`](drift_core::CollisionQuery)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collision;
pub mod edge;
pub mod line;
pub mod neighborhood;
pub mod obstacle;

pub use collision::collides;
pub use edge::EdgeBehavior;
pub use line::LineCells;
pub use neighborhood::{Footprint, NeighborCell, Neighborhood, NeighborhoodIter};
pub use obstacle::{stamp_range, ObstacleMap};

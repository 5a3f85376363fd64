//! Simulation driver for Drift.
//!
//! Ties the obstacle map, motion models and occupancy renderer together
//! behind the surface a particle filter calls into:
//!
//! | Operation | Method |
//! |-----------|--------|
//! | dynamics | [`Simulation::dynamics`] |
//! | observation | [`Simulation::observe`], [`Simulation::observe_truth`] |
//! | wall input | [`Simulation::paint_point`], [`Simulation::paint_line`], [`Simulation::clear_walls`] |
//! | reset | [`Simulation::reset`] |
//!
//! Walls may also be painted from other threads through a [`WallHandle`]
//! or queued through a [`WallSender`]; queued commands are applied at the
//! start of the next [`Simulation::tick`].
//!
//! The library logs through `tracing` and never installs a subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod scenario;
pub mod sim;
pub mod walls;

pub use config::{EngineError, SimConfig, TargetConfig, MAX_WALL_THICKNESS};
pub use scenario::{Scenario, Segment};
pub use sim::{FilterHooks, ResetScope, Simulation, TickReport};
pub use walls::{WallBrush, WallCommand, WallHandle, WallSender};

//! Occupancy rendering for Drift simulations.
//!
//! Turns a set of agents into a dense intensity grid, the synthetic
//! observation a filter compares its ensemble against. Fields are rebuilt
//! from scratch on every call and never updated incrementally.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod render;

pub use field::OccupancyField;
pub use render::{OccupancyRenderer, RenderConfig, RenderMode};

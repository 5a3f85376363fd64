//! Test utilities and mock types for Drift development.
//!
//! Provides mock implementations of [`CollisionQuery`] that do not need a
//! painted obstacle map, plus fixtures for seeded randomness and agents.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{agent, ring, seeded_rng};

use std::sync::atomic::{AtomicUsize, Ordering};

use drift_core::{Cell, CollisionQuery, GridDims};
use indexmap::IndexSet;

/// A wall-free world: only positions outside the grid collide.
///
/// Radius is ignored, so agents can touch the edge without colliding.
#[derive(Clone, Copy, Debug)]
pub struct OpenArena {
    dims: GridDims,
}

impl OpenArena {
    /// # Panics
    ///
    /// Panics on zero dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dims: GridDims::new(width, height).expect("arena dimensions must be positive"),
        }
    }
}

impl CollisionQuery for OpenArena {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn collides(&self, x: f64, y: f64, _radius: f64) -> bool {
        !self.dims.contains_point(x, y)
    }
}

/// Point collider over an explicit set of blocked cells.
///
/// A position collides when it lies outside the grid or its rounded cell is
/// in the set. Radius is ignored, which makes corner and slide cases easy to
/// set up exactly.
#[derive(Clone, Debug)]
pub struct CellCollider {
    dims: GridDims,
    blocked: IndexSet<Cell>,
}

impl CellCollider {
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            blocked: IndexSet::new(),
        }
    }

    pub fn from_cells(dims: GridDims, cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            dims,
            blocked: cells.into_iter().collect(),
        }
    }

    /// Block one more cell. Returns `false` if it was already blocked.
    pub fn block(&mut self, cell: Cell) -> bool {
        self.blocked.insert(cell)
    }

    /// Blocked cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.blocked.iter()
    }
}

impl CollisionQuery for CellCollider {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn collides(&self, x: f64, y: f64, _radius: f64) -> bool {
        if !self.dims.contains_point(x, y) {
            return true;
        }
        self.blocked
            .contains(&(x.round() as i32, y.round() as i32))
    }
}

/// Wraps another query and counts how many times it was asked.
#[derive(Debug)]
pub struct CountingQuery<Q> {
    inner: Q,
    calls: AtomicUsize,
}

impl<Q: CollisionQuery> CountingQuery<Q> {
    pub fn new(inner: Q) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `collides` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<Q: CollisionQuery> CollisionQuery for CountingQuery<Q> {
    fn dims(&self) -> GridDims {
        self.inner.dims()
    }

    fn collides(&self, x: f64, y: f64, radius: f64) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.collides(x, y, radius)
    }
}

//! Clamped neighborhood iteration over square and disk footprints.
//!
//! Painting, collision testing and rendering all scan "every cell near
//! this point". [`Neighborhood`] captures that scan once: it resolves the
//! footprint's bounding box against the grid up front, then yields cells
//! lazily in row-major order. It is cheap to clone and every call to
//! [`Neighborhood::iter`] restarts from the first cell.

use crate::edge::EdgeBehavior;
use drift_core::{Cell, GridDims};

/// Shape of the scanned region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Footprint {
    /// Integer offsets `lo..=hi` on both axes around an integer center.
    Square {
        /// Lowest offset (inclusive).
        lo: i32,
        /// Highest offset (inclusive).
        hi: i32,
    },
    /// Every cell whose Euclidean distance from a continuous center is at
    /// most `radius`.
    Disk {
        /// Disk radius in cells.
        radius: f64,
    },
}

/// One cell produced by a [`Neighborhood`] scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborCell {
    /// Grid cell (already clamped or filtered per [`EdgeBehavior`]).
    pub cell: Cell,
    /// Euclidean distance from the scan center to the unclamped cell.
    pub distance: f64,
}

/// A finite, restartable scan of the cells inside a footprint.
#[derive(Clone, Debug)]
pub struct Neighborhood {
    dims: GridDims,
    edge: EdgeBehavior,
    center: (f64, f64),
    footprint: Footprint,
    x0: i64,
    x1: i64,
    y0: i64,
    y1: i64,
}

impl Neighborhood {
    /// Square footprint spanning offsets `lo..=hi` around `center`.
    ///
    /// With [`EdgeBehavior::Clamp`] the bounding box itself is pinned onto
    /// the grid, so each in-grid cell is produced at most once.
    pub fn square(dims: GridDims, center: Cell, lo: i32, hi: i32, edge: EdgeBehavior) -> Self {
        if lo > hi {
            return Self::empty(dims, edge, Footprint::Square { lo, hi });
        }
        let (cx, cy) = (center.0 as i64, center.1 as i64);
        let (lo, hi) = (lo as i64, hi as i64);
        Self::resolved(
            dims,
            edge,
            (cx as f64, cy as f64),
            Footprint::Square {
                lo: lo as i32,
                hi: hi as i32,
            },
            (cx + lo, cx + hi),
            (cy + lo, cy + hi),
        )
    }

    /// Disk footprint of `radius` around a continuous `center`.
    ///
    /// A negative, NaN or infinite radius, or a non-finite center, yields
    /// an empty scan.
    pub fn disk(dims: GridDims, center: (f64, f64), radius: f64, edge: EdgeBehavior) -> Self {
        let footprint = Footprint::Disk { radius };
        if !(center.0.is_finite() && center.1.is_finite() && radius.is_finite() && radius >= 0.0)
        {
            return Self::empty(dims, edge, footprint);
        }
        let x = ((center.0 - radius).ceil() as i64, (center.0 + radius).floor() as i64);
        let y = ((center.1 - radius).ceil() as i64, (center.1 + radius).floor() as i64);
        Self::resolved(dims, edge, center, footprint, x, y)
    }

    fn empty(dims: GridDims, edge: EdgeBehavior, footprint: Footprint) -> Self {
        Self {
            dims,
            edge,
            center: (0.0, 0.0),
            footprint,
            x0: 0,
            x1: -1,
            y0: 0,
            y1: -1,
        }
    }

    fn resolved(
        dims: GridDims,
        edge: EdgeBehavior,
        center: (f64, f64),
        footprint: Footprint,
        (x0, x1): (i64, i64),
        (y0, y1): (i64, i64),
    ) -> Self {
        let max_x = dims.width() as i64 - 1;
        let max_y = dims.height() as i64 - 1;
        let (x0, x1, y0, y1) = match (edge, footprint) {
            (EdgeBehavior::Absorb, _) => (x0.max(0), x1.min(max_x), y0.max(0), y1.min(max_y)),
            (EdgeBehavior::Clamp, Footprint::Square { .. }) => (
                x0.clamp(0, max_x),
                x1.clamp(0, max_x),
                y0.clamp(0, max_y),
                y1.clamp(0, max_y),
            ),
            // Disk membership is decided on unclamped offsets, so the box
            // must stay unclamped and each cell is pinned as it is yielded.
            (EdgeBehavior::Clamp, Footprint::Disk { .. }) => (x0, x1, y0, y1),
        };
        if x0 > x1 || y0 > y1 {
            return Self::empty(dims, edge, footprint);
        }
        Self {
            dims,
            edge,
            center,
            footprint,
            x0,
            x1,
            y0,
            y1,
        }
    }

    /// The footprint this scan was built from.
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Whether the resolved bounding box contains no cells at all.
    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    /// Start a fresh pass over the cells.
    pub fn iter(&self) -> NeighborhoodIter<'_> {
        NeighborhoodIter {
            hood: self,
            x: self.x0,
            y: self.y0,
        }
    }
}

impl<'a> IntoIterator for &'a Neighborhood {
    type Item = NeighborCell;
    type IntoIter = NeighborhoodIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`Neighborhood`], row-major.
#[derive(Clone, Debug)]
pub struct NeighborhoodIter<'a> {
    hood: &'a Neighborhood,
    x: i64,
    y: i64,
}

impl Iterator for NeighborhoodIter<'_> {
    type Item = NeighborCell;

    fn next(&mut self) -> Option<NeighborCell> {
        let h = self.hood;
        while self.y <= h.y1 {
            if self.x > h.x1 {
                self.x = h.x0;
                self.y += 1;
                continue;
            }
            let (x, y) = (self.x, self.y);
            self.x += 1;

            let dx = x as f64 - h.center.0;
            let dy = y as f64 - h.center.1;
            let dist_sq = dx * dx + dy * dy;
            if let Footprint::Disk { radius } = h.footprint {
                if dist_sq > radius * radius {
                    continue;
                }
            }
            let cell = match h.edge {
                EdgeBehavior::Absorb => (x as i32, y as i32),
                EdgeBehavior::Clamp => (
                    x.clamp(0, h.dims.width() as i64 - 1) as i32,
                    y.clamp(0, h.dims.height() as i64 - 1) as i32,
                ),
            };
            return Some(NeighborCell {
                cell,
                distance: dist_sq.sqrt(),
            });
        }
        None
    }
}

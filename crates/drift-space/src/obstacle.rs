//! The persistent obstacle (wall) map.

use crate::edge::EdgeBehavior;
use crate::line::LineCells;
use crate::neighborhood::Neighborhood;
use drift_core::{Cell, GridDims};

/// Offset range `(lo, hi)` stamped on each axis for a brush `thickness`.
///
/// The range is `floor(-t/2) ..= floor(t/2)`: asymmetric for odd
/// thicknesses (`t = 1` stamps a 2x2 block at offsets `-1..=0`) and
/// symmetric for even ones (`t = 2` stamps a 3x3 block). This is what
/// gives drawn walls their visible width.
pub fn stamp_range(thickness: u32) -> (i32, i32) {
    let t = thickness.min(i32::MAX as u32 - 1) as i32;
    (-((t + 1) / 2), t / 2)
}

/// Boolean grid of blocked cells.
///
/// Cells outside the grid are implicitly blocked. The map is only mutated
/// through the explicit paint operations and [`clear`](Self::clear); the
/// motion and observation models read it through
/// [`CollisionQuery`](drift_core::CollisionQuery).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleMap {
    dims: GridDims,
    cells: Vec<bool>,
    blocked: usize,
}

impl ObstacleMap {
    /// Create an empty (fully open) map.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![false; dims.cell_count()],
            blocked: 0,
        }
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Whether `(x, y)` is blocked. Always `true` outside the grid.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        match self.dims.index(x, y) {
            Some(i) => self.cells[i],
            None => true,
        }
    }

    /// Number of blocked in-grid cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked
    }

    /// Iterate over blocked in-grid cells in row-major order.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let w = self.dims.width() as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(move |(i, _)| ((i % w) as i32, (i / w) as i32))
    }

    /// Row-major blocked mask, one entry per cell.
    pub fn as_mask(&self) -> &[bool] {
        &self.cells
    }

    /// Stamp a `thickness` brush at `(x, y)`.
    ///
    /// The center is clamped onto the grid first; stamped cells that fall
    /// off the grid are pinned to the nearest edge cell. Returns the number
    /// of cells that became blocked.
    pub fn paint_point(&mut self, x: i32, y: i32, thickness: u32) -> usize {
        let center = self.dims.clamp_cell(x, y);
        self.stamp(center, thickness)
    }

    /// Rasterize the segment `from → to` and stamp a `thickness` brush on
    /// every cell of it.
    ///
    /// Endpoints are clamped onto the grid first. Painting `a → b` and
    /// `b → a` blocks the same cells. Returns the number of cells that
    /// became blocked.
    pub fn paint_line(&mut self, from: Cell, to: Cell, thickness: u32) -> usize {
        let a = self.dims.clamp_cell(from.0, from.1);
        let b = self.dims.clamp_cell(to.0, to.1);
        LineCells::new(a, b)
            .map(|cell| self.stamp(cell, thickness))
            .sum()
    }

    /// Reset every cell to open.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.blocked = 0;
    }

    fn stamp(&mut self, center: Cell, thickness: u32) -> usize {
        let (lo, hi) = stamp_range(thickness);
        let hood = Neighborhood::square(self.dims, center, lo, hi, EdgeBehavior::Clamp);
        let mut newly = 0;
        for n in hood.iter() {
            if let Some(i) = self.dims.index(n.cell.0, n.cell.1) {
                if !self.cells[i] {
                    self.cells[i] = true;
                    newly += 1;
                }
            }
        }
        self.blocked += newly;
        newly
    }
}

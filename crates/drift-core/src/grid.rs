//! Grid dimensions and cell addressing.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// An integer grid cell `(x, y)`.
///
/// Signed so that neighborhood offsets may step outside the grid before
/// being clamped or discarded.
pub type Cell = (i32, i32);

/// Width and height of the simulation grid, fixed for a simulation's lifetime.
///
/// Cells are stored row-major: `index = y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDims", into = "RawDims")]
pub struct GridDims {
    width: u32,
    height: u32,
}

#[derive(Serialize, Deserialize)]
struct RawDims {
    width: u32,
    height: u32,
}

impl TryFrom<RawDims> for GridDims {
    type Error = ConfigError;

    fn try_from(raw: RawDims) -> Result<Self, Self::Error> {
        GridDims::new(raw.width, raw.height)
    }
}

impl From<GridDims> for RawDims {
    fn from(dims: GridDims) -> Self {
        RawDims {
            width: dims.width,
            height: dims.height,
        }
    }
}

impl GridDims {
    /// Create grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimensions`] if either side is zero or
    /// does not fit in an `i32` cell coordinate.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `(x, y)` is inside `[0, width) x [0, height)`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Whether a continuous position lies inside `[0, width) x [0, height)`.
    ///
    /// Non-finite coordinates are never contained.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }

    /// Clamp a cell onto the grid: `[0, width-1] x [0, height-1]`.
    pub fn clamp_cell(&self, x: i32, y: i32) -> Cell {
        (
            x.clamp(0, self.width as i32 - 1),
            y.clamp(0, self.height as i32 - 1),
        )
    }

    /// Row-major index of `(x, y)`, or `None` when out of bounds.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Geometric center of the grid in continuous coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_sides_are_rejected() {
        assert_eq!(
            GridDims::new(0, 10),
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(GridDims::new(10, 0).is_err());
        assert!(GridDims::new(u32::MAX, 1).is_err());
    }

    #[test]
    fn index_is_row_major() {
        let d = GridDims::new(4, 3).unwrap();
        assert_eq!(d.index(0, 0), Some(0));
        assert_eq!(d.index(3, 0), Some(3));
        assert_eq!(d.index(0, 1), Some(4));
        assert_eq!(d.index(3, 2), Some(11));
        assert_eq!(d.index(4, 0), None);
        assert_eq!(d.index(-1, 0), None);
        assert_eq!(d.cell_count(), 12);
    }

    #[test]
    fn clamp_cell_pins_to_edges() {
        let d = GridDims::new(10, 5).unwrap();
        assert_eq!(d.clamp_cell(-3, 7), (0, 4));
        assert_eq!(d.clamp_cell(12, -1), (9, 0));
        assert_eq!(d.clamp_cell(4, 2), (4, 2));
    }

    #[test]
    fn contains_point_is_half_open() {
        let d = GridDims::new(10, 10).unwrap();
        assert!(d.contains_point(0.0, 9.999));
        assert!(!d.contains_point(10.0, 5.0));
        assert!(!d.contains_point(-0.001, 5.0));
        assert!(!d.contains_point(f64::NAN, 5.0));
    }

    #[test]
    fn serde_rejects_zero_dimensions() {
        let ok: GridDims = serde_json::from_str(r#"{"width":8,"height":6}"#).unwrap();
        assert_eq!(ok, GridDims::new(8, 6).unwrap());
        let bad = serde_json::from_str::<GridDims>(r#"{"width":0,"height":6}"#);
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn clamped_cells_are_always_contained(
            w in 1u32..64, h in 1u32..64, x in -200i32..200, y in -200i32..200,
        ) {
            let d = GridDims::new(w, h).unwrap();
            let (cx, cy) = d.clamp_cell(x, y);
            prop_assert!(d.contains(cx, cy));
            prop_assert!(d.index(cx, cy).unwrap() < d.cell_count());
            if d.contains(x, y) {
                prop_assert_eq!((cx, cy), (x, y));
            }
        }
    }
}

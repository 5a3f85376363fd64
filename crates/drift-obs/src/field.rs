//! Dense row-major intensity grid.

use drift_core::GridDims;

/// A `width × height` grid of intensities in `[0, 1]`, row-major.
///
/// Binary renders hold only `0.0` and `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyField {
    dims: GridDims,
    data: Vec<f32>,
}

impl OccupancyField {
    /// An all-zero field.
    pub fn zeros(dims: GridDims) -> Self {
        Self {
            dims,
            data: vec![0.0; dims.cell_count()],
        }
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Intensity at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.dims.index(x, y).map(|i| self.data[i])
    }

    /// Raise the cell at `(x, y)` to at least `value`. Off-grid cells are
    /// ignored.
    pub fn raise(&mut self, x: i32, y: i32, value: f32) {
        if let Some(i) = self.dims.index(x, y) {
            let v = &mut self.data[i];
            if value > *v {
                *v = value;
            }
        }
    }

    /// Reset every cell to zero.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Row-major cell values.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consume the field, returning its buffer.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// One row of the field.
    pub fn row(&self, y: u32) -> Option<&[f32]> {
        if y >= self.dims.height() {
            return None;
        }
        let w = self.dims.width() as usize;
        let start = y as usize * w;
        Some(&self.data[start..start + w])
    }

    /// Number of cells with non-zero intensity.
    pub fn lit_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0.0).count()
    }

    /// Sum of all intensities.
    pub fn total(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Largest intensity, `0.0` for an empty field.
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(0.0, f32::max)
    }

    /// Mean absolute per-cell difference to another field of the same size,
    /// or `None` when the dimensions differ.
    pub fn mean_abs_diff(&self, other: &OccupancyField) -> Option<f64> {
        if self.dims != other.dims {
            return None;
        }
        let sum: f64 = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| (a as f64 - b as f64).abs())
            .sum();
        Some(sum / self.data.len() as f64)
    }
}

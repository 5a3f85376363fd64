//! Bresenham line rasterization.

use drift_core::Cell;

/// Iterator over the 8-connected cells of a discrete segment, endpoints
/// inclusive.
///
/// Endpoints are put in a canonical order before stepping, so
/// `LineCells::new(a, b)` and `LineCells::new(b, a)` produce the same cells
/// (in the same order). A zero-length segment yields its single cell.
///
/// # Examples
///
/// ```
/// use drift_space::LineCells;
///
/// let cells: Vec<_> = LineCells::new((0, 0), (4, 2)).collect();
/// assert_eq!(cells, vec![(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]);
/// ```
#[derive(Clone, Debug)]
pub struct LineCells {
    x: i64,
    y: i64,
    end: (i64, i64),
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LineCells {
    /// Rasterize the segment between two integer endpoints.
    pub fn new(a: Cell, b: Cell) -> Self {
        let (from, to) = if b < a { (b, a) } else { (a, b) };
        let (x0, y0) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            end: (x1, y1),
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LineCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.done {
            return None;
        }
        let current = (self.x as i32, self.y as i32);
        if (self.x, self.y) == self.end {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_length_is_single_cell() {
        assert_eq!(LineCells::new((3, 3), (3, 3)).collect::<Vec<_>>(), vec![(3, 3)]);
    }

    #[test]
    fn horizontal_and_vertical() {
        assert_eq!(
            LineCells::new((1, 2), (4, 2)).collect::<Vec<_>>(),
            vec![(1, 2), (2, 2), (3, 2), (4, 2)]
        );
        assert_eq!(
            LineCells::new((0, 3), (0, 0)).collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (0, 2), (0, 3)]
        );
    }

    #[test]
    fn diagonal() {
        assert_eq!(
            LineCells::new((0, 0), (3, 3)).collect::<Vec<_>>(),
            vec![(0, 0), (1, 1), (2, 2), (3, 3)]
        );
    }

    proptest! {
        #[test]
        fn endpoints_included_and_reversible(
            x0 in -20i32..20, y0 in -20i32..20, x1 in -20i32..20, y1 in -20i32..20,
        ) {
            let fwd: Vec<_> = LineCells::new((x0, y0), (x1, y1)).collect();
            let rev: Vec<_> = LineCells::new((x1, y1), (x0, y0)).collect();
            prop_assert_eq!(&fwd, &rev);
            prop_assert!(fwd.contains(&(x0, y0)));
            prop_assert!(fwd.contains(&(x1, y1)));
            let steps = (x1 - x0).abs().max((y1 - y0).abs()) as usize;
            prop_assert_eq!(fwd.len(), steps + 1);
        }

        #[test]
        fn consecutive_cells_are_eight_connected(
            x0 in -20i32..20, y0 in -20i32..20, x1 in -20i32..20, y1 in -20i32..20,
        ) {
            let cells: Vec<_> = LineCells::new((x0, y0), (x1, y1)).collect();
            for w in cells.windows(2) {
                prop_assert!((w[0].0 - w[1].0).abs() <= 1);
                prop_assert!((w[0].1 - w[1].1).abs() <= 1);
                prop_assert!(w[0] != w[1]);
            }
        }
    }
}

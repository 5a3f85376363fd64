//! Square-neighborhood collision test.

use crate::edge::EdgeBehavior;
use crate::neighborhood::Neighborhood;
use crate::obstacle::ObstacleMap;
use drift_core::{CollisionQuery, GridDims};

/// Whether a disk of `radius` at `(x, y)` hits a wall or the grid boundary.
///
/// Position and radius are rounded to the nearest integer (half away from
/// zero). The boundary check comes first: if the rounded position is closer
/// than the rounded radius to any grid edge, the test reports a collision.
/// Otherwise every cell of the square `[-r, r]²` around the rounded position
/// is tested against the map.
///
/// The footprint is a square, not a circle, so the test is conservative
/// compared to the disk the renderer draws.
///
/// Positions outside `[0, width) x [0, height)` and non-finite positions
/// always collide. A NaN or negative radius is treated as zero.
///
/// # Examples
///
/// ```
/// use drift_core::GridDims;
/// use drift_space::{collides, ObstacleMap};
///
/// let mut map = ObstacleMap::new(GridDims::new(10, 10).unwrap());
/// map.paint_point(5, 5, 1);
/// assert!(collides(&map, 5.0, 4.0, 1.0));
/// assert!(!collides(&map, 2.0, 2.0, 1.0));
/// assert!(collides(&map, 0.4, 5.0, 1.0));
/// ```
pub fn collides(map: &ObstacleMap, x: f64, y: f64, radius: f64) -> bool {
    let dims = map.dims();
    if !dims.contains_point(x, y) {
        return true;
    }
    let r = radius.max(0.0).round();
    let (w, h) = (dims.width() as f64, dims.height() as f64);
    let (xi, yi) = (x.round(), y.round());
    if xi < r || xi >= w - r || yi < r || yi >= h - r {
        return true;
    }
    // Past the boundary check, r < min(w, h) / 2 so the casts are exact.
    let r = r as i32;
    let center = (xi as i32, yi as i32);
    Neighborhood::square(dims, center, -r, r, EdgeBehavior::Absorb)
        .iter()
        .any(|n| map.is_blocked(n.cell.0, n.cell.1))
}

impl CollisionQuery for ObstacleMap {
    fn dims(&self) -> GridDims {
        ObstacleMap::dims(self)
    }

    fn collides(&self, x: f64, y: f64, radius: f64) -> bool {
        collides(self, x, y, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn open(w: u32, h: u32) -> ObstacleMap {
        ObstacleMap::new(GridDims::new(w, h).unwrap())
    }

    #[test]
    fn open_interior_is_free() {
        let map = open(10, 10);
        assert!(!collides(&map, 5.0, 5.0, 1.0));
        assert!(!collides(&map, 1.0, 1.0, 1.0));
        assert!(!collides(&map, 8.0, 8.0, 1.0));
    }

    #[test]
    fn boundary_counts_as_wall() {
        let map = open(10, 10);
        assert!(collides(&map, 0.0, 5.0, 1.0));
        assert!(collides(&map, 9.0, 5.0, 1.0));
        assert!(collides(&map, 5.0, 9.2, 1.0));
        // Rounded radius 0 only collides off-grid.
        assert!(!collides(&map, 0.0, 0.0, 0.4));
    }

    #[test]
    fn wall_adjacent_to_footprint_is_detected() {
        let mut map = open(10, 10);
        map.paint_point(5, 5, 1);
        // Blocks (4..=5, 4..=5). From (5,4) with r=1 the square reaches y=5.
        assert!(collides(&map, 5.0, 4.0, 1.0));
        assert!(collides(&map, 5.4, 3.6, 1.0));
        assert!(!collides(&map, 5.0, 2.0, 1.0));
        assert!(!collides(&map, 7.0, 7.0, 1.0));
    }

    #[test]
    fn square_footprint_hits_diagonal_corner() {
        let mut map = open(12, 12);
        map.paint_point(7, 7, 0);
        // Distance sqrt(2) > 1, yet the square test reports a hit.
        assert!(collides(&map, 6.0, 6.0, 1.0));
    }

    #[test]
    fn non_finite_input() {
        let map = open(10, 10);
        assert!(collides(&map, f64::NAN, 5.0, 1.0));
        assert!(collides(&map, 5.0, f64::INFINITY, 1.0));
        assert!(!collides(&map, 5.0, 5.0, f64::NAN));
        assert!(collides(&map, 5.0, 5.0, f64::INFINITY));
    }

    #[test]
    fn trait_object_matches_free_function() {
        let mut map = open(10, 10);
        map.paint_line((2, 7), (7, 7), 1);
        let q: &dyn CollisionQuery = &map;
        for y in 0..10 {
            for x in 0..10 {
                let (fx, fy) = (x as f64 + 0.25, y as f64 - 0.25);
                assert_eq!(q.collides(fx, fy, 1.0), collides(&map, fx, fy, 1.0));
            }
        }
        assert_eq!(q.dims(), map.dims());
    }

    #[test]
    fn oversized_radius_always_collides() {
        let map = open(8, 6);
        let mut y = -1.0;
        while y <= 7.0 {
            let mut x = -1.0;
            while x <= 9.0 {
                assert!(collides(&map, x, y, 3.0), "({x}, {y}) with r=3");
                assert!(collides(&map, x, y, 4.6), "({x}, {y}) with r=4.6");
                x += 0.25;
            }
            y += 0.25;
        }
    }

    proptest! {
        #[test]
        fn outside_grid_always_collides(
            w in 1u32..40, h in 1u32..40,
            x in -100.0f64..100.0, y in -100.0f64..100.0, r in 0.0f64..5.0,
        ) {
            let map = open(w, h);
            prop_assume!(!map.dims().contains_point(x, y));
            prop_assert!(collides(&map, x, y, r));
        }

        #[test]
        fn painting_never_frees_a_position(
            x in 0.0f64..20.0, y in 0.0f64..20.0, r in 0.0f64..4.0,
            px in 0i32..20, py in 0i32..20, t in 0u32..4,
        ) {
            let mut map = open(20, 20);
            let before = collides(&map, x, y, r);
            map.paint_point(px, py, t);
            prop_assert!(!before || collides(&map, x, y, r));
        }
    }
}

//! Core abstraction traits.

use crate::grid::GridDims;

/// Read-only collision test against the static geometry of a world.
///
/// Implemented by `drift_space::ObstacleMap`. The motion and observation
/// models only see geometry through this trait, which keeps them testable
/// against mock arenas and lets the engine hold the real map behind a lock
/// while a sweep runs.
pub trait CollisionQuery {
    /// Dimensions of the grid the query is answered on.
    fn dims(&self) -> GridDims;

    /// Whether a disk of `radius` centered at `(x, y)` overlaps a wall or
    /// crosses the grid boundary.
    ///
    /// Must be a pure function of its arguments and the geometry state.
    fn collides(&self, x: f64, y: f64, radius: f64) -> bool;
}

impl<T: CollisionQuery + ?Sized> CollisionQuery for &T {
    fn dims(&self) -> GridDims {
        (**self).dims()
    }

    fn collides(&self, x: f64, y: f64, radius: f64) -> bool {
        (**self).collides(x, y, radius)
    }
}

//! Edge (boundary) behavior for neighborhood scans.

use serde::{Deserialize, Serialize};

/// How a [`Neighborhood`](crate::Neighborhood) treats cells that fall
/// outside the grid.
///
/// # Examples
///
/// ```
/// use drift_core::GridDims;
/// use drift_space::{EdgeBehavior, Neighborhood};
///
/// let dims = GridDims::new(4, 4).unwrap();
///
/// // Absorb: a 3x3 block centered off the grid contributes nothing.
/// let absorb = Neighborhood::square(dims, (-5, 0), -1, 1, EdgeBehavior::Absorb);
/// assert_eq!(absorb.iter().count(), 0);
///
/// // Clamp: the same block is pinned onto the left edge.
/// let clamp = Neighborhood::square(dims, (-5, 0), -1, 1, EdgeBehavior::Clamp);
/// let cells: Vec<_> = clamp.iter().map(|n| n.cell).collect();
/// assert_eq!(cells, vec![(0, 0), (0, 1)]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeBehavior {
    /// Out-of-bounds cells are pinned to the nearest boundary cell.
    Clamp,
    /// Out-of-bounds cells are omitted.
    Absorb,
}

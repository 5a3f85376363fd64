//! Shared wall state, cross-thread wall commands, and pointer translation.
//!
//! The obstacle map is the only mutable state shared with the outside
//! world. It lives behind a [`WallHandle`] (an `Arc<Mutex<ObstacleMap>>`);
//! the simulation holds the lock for a whole tick, so a paint either lands
//! entirely before a collision sweep or entirely after it.
//!
//! Input threads that must not block use a [`WallSender`] instead: commands
//! queue on a bounded channel and the simulation applies them under the
//! lock at the start of the next tick.

use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use drift_core::{Cell, GridDims};
use drift_space::ObstacleMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineError;
use crate::scenario::Scenario;

// ── WallCommand ────────────────────────────────────────────────────

/// One edit to the obstacle map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallCommand {
    /// Stamp the brush at a cell.
    Point(Cell),
    /// Paint a thick segment.
    Line(Cell, Cell),
    /// Remove every wall.
    Clear,
    /// Replace all walls with a preset layout.
    Scenario(Scenario),
}

impl WallCommand {
    /// Apply to `map` with brush `thickness`. Returns newly blocked cells;
    /// `Clear` and `Scenario` return the blocked count afterwards.
    pub fn apply(self, map: &mut ObstacleMap, thickness: u32) -> usize {
        match self {
            Self::Point((x, y)) => map.paint_point(x, y, thickness),
            Self::Line(from, to) => map.paint_line(from, to, thickness),
            Self::Clear => {
                map.clear();
                0
            }
            Self::Scenario(s) => s.apply(map, thickness),
        }
    }
}

// ── WallHandle ─────────────────────────────────────────────────────

/// Cloneable shared reference to the obstacle map.
#[derive(Clone, Debug)]
pub struct WallHandle {
    inner: Arc<Mutex<ObstacleMap>>,
}

impl WallHandle {
    /// Wrap an empty map of `dims`.
    pub fn new(dims: GridDims) -> Self {
        Self::from_map(ObstacleMap::new(dims))
    }

    /// Wrap an existing map.
    pub fn from_map(map: ObstacleMap) -> Self {
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    /// Lock the map.
    ///
    /// A poisoned lock is recovered: a panic mid-paint leaves a partially
    /// painted map, which is still a valid map.
    pub fn lock(&self) -> MutexGuard<'_, ObstacleMap> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("wall map lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Apply one command under the lock.
    pub fn apply(&self, command: WallCommand, thickness: u32) -> usize {
        command.apply(&mut self.lock(), thickness)
    }

    /// Copy the current map out.
    pub fn snapshot(&self) -> ObstacleMap {
        self.lock().clone()
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.lock().dims()
    }
}

// ── Command queue ──────────────────────────────────────────────────

/// Sending half of the wall command queue. Cheap to clone and `Send`.
#[derive(Clone, Debug)]
pub struct WallSender {
    tx: Sender<WallCommand>,
    capacity: usize,
}

impl WallSender {
    /// Queue a command without blocking.
    ///
    /// # Errors
    ///
    /// [`EngineError::WallQueueFull`] when the queue is at capacity,
    /// [`EngineError::WallQueueClosed`] once the simulation is dropped.
    pub fn submit(&self, command: WallCommand) -> Result<(), EngineError> {
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => {
                warn!(capacity = self.capacity, ?command, "wall command dropped: queue full");
                EngineError::WallQueueFull {
                    capacity: self.capacity,
                }
            }
            TrySendError::Disconnected(_) => EngineError::WallQueueClosed,
        })
    }

    /// Commands currently waiting.
    pub fn pending(&self) -> usize {
        self.tx.len()
    }
}

/// Create a bounded command queue.
pub(crate) fn wall_queue(capacity: usize) -> (WallSender, Receiver<WallCommand>) {
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (WallSender { tx, capacity }, rx)
}

// ── WallBrush ──────────────────────────────────────────────────────

/// Pointer stroke state machine translating screen coordinates into wall
/// commands.
///
/// Screen coordinates are divided by the scale factor, truncated and
/// clamped onto the grid. A press stamps a point; each drag while pressed
/// paints a line from the previous point; release ends the stroke.
///
/// # Examples
///
/// ```
/// use drift_core::GridDims;
/// use drift_engine::{WallBrush, WallCommand};
///
/// let mut brush = WallBrush::new(GridDims::new(100, 100).unwrap(), 8.0);
/// assert_eq!(brush.press(80.0, 160.0), WallCommand::Point((10, 20)));
/// assert_eq!(brush.drag(120.0, 160.0), Some(WallCommand::Line((10, 20), (15, 20))));
/// brush.release();
/// assert_eq!(brush.drag(0.0, 0.0), None);
/// ```
#[derive(Clone, Debug)]
pub struct WallBrush {
    dims: GridDims,
    scale: f64,
    last: Option<Cell>,
}

impl WallBrush {
    /// Create a brush for a grid shown at `scale` screen pixels per cell.
    ///
    /// A non-positive or non-finite scale is treated as 1.
    pub fn new(dims: GridDims, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            dims,
            scale,
            last: None,
        }
    }

    /// Map a screen coordinate to a grid cell.
    pub fn to_cell(&self, sx: f64, sy: f64) -> Cell {
        let gx = (sx / self.scale).trunc();
        let gy = (sy / self.scale).trunc();
        // Saturating float casts; NaN maps to 0.
        self.dims.clamp_cell(gx as i32, gy as i32)
    }

    /// Begin a stroke.
    pub fn press(&mut self, sx: f64, sy: f64) -> WallCommand {
        let cell = self.to_cell(sx, sy);
        self.last = Some(cell);
        WallCommand::Point(cell)
    }

    /// Continue a stroke. `None` when no stroke is active.
    pub fn drag(&mut self, sx: f64, sy: f64) -> Option<WallCommand> {
        let from = self.last?;
        let to = self.to_cell(sx, sy);
        self.last = Some(to);
        Some(WallCommand::Line(from, to))
    }

    /// End the stroke.
    pub fn release(&mut self) {
        self.last = None;
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Clear every wall and end any stroke.
    pub fn erase_all(&mut self) -> WallCommand {
        self.last = None;
        WallCommand::Clear
    }
}

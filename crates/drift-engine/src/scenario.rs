//! Preset wall layouts.

use drift_core::{Cell, GridDims};
use drift_space::ObstacleMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Side length of the canvas the preset segments were authored on.
pub const SCENARIO_CANVAS: i64 = 600;

/// A wall segment in grid cells.
pub type Segment = (Cell, Cell);

/// Named wall layouts.
///
/// Segments are authored on a 600×600 canvas and scaled to the target grid,
/// so a layout looks the same at any resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// No walls.
    #[default]
    Empty,
    /// Two horizontal bars and two vertical posts.
    Obstacles,
    /// A horizontal bar crossed by a broken vertical line.
    Dispersion,
    /// Two horizontal and two vertical lanes forming a grid of streets.
    Traffic,
}

impl Scenario {
    /// Every preset, in declaration order.
    pub const ALL: [Scenario; 4] = [
        Scenario::Empty,
        Scenario::Obstacles,
        Scenario::Dispersion,
        Scenario::Traffic,
    ];

    /// Segments on the authoring canvas.
    pub fn canvas_segments(self) -> &'static [[i64; 4]] {
        match self {
            Self::Empty => &[],
            Self::Obstacles => &[
                [100, 100, 300, 100],
                [300, 200, 500, 200],
                [200, 300, 200, 500],
                [400, 300, 400, 500],
            ],
            Self::Dispersion => &[
                [150, 250, 450, 250],
                [300, 100, 300, 200],
                [300, 300, 300, 500],
            ],
            Self::Traffic => &[
                [50, 200, 550, 200],
                [50, 400, 550, 400],
                [250, 50, 250, 550],
                [350, 50, 350, 550],
            ],
        }
    }

    /// Segments scaled onto a grid of `dims`.
    pub fn segments(self, dims: GridDims) -> SmallVec<[Segment; 4]> {
        let sx = |v: i64| (v * dims.width() as i64 / SCENARIO_CANVAS) as i32;
        let sy = |v: i64| (v * dims.height() as i64 / SCENARIO_CANVAS) as i32;
        self.canvas_segments()
            .iter()
            .map(|&[x1, y1, x2, y2]| ((sx(x1), sy(y1)), (sx(x2), sy(y2))))
            .collect()
    }

    /// Clear `map` and paint this layout with `thickness`.
    ///
    /// Returns the number of blocked cells afterwards.
    pub fn apply(self, map: &mut ObstacleMap, thickness: u32) -> usize {
        map.clear();
        for (from, to) in self.segments(map.dims()) {
            map.paint_line(from, to, thickness);
        }
        map.blocked_count()
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Obstacles => "obstacles",
            Self::Dispersion => "dispersion",
            Self::Traffic => "traffic",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(n: u32) -> ObstacleMap {
        ObstacleMap::new(GridDims::new(n, n).unwrap())
    }

    #[test]
    fn segments_scale_with_grid() {
        let d = GridDims::new(100, 100).unwrap();
        let segs = Scenario::Obstacles.segments(d);
        assert_eq!(segs[0], ((16, 16), (50, 16)));
        assert_eq!(segs.len(), 4);
        assert!(!segs.spilled());
        let native = Scenario::Traffic.segments(GridDims::new(600, 600).unwrap());
        assert_eq!(native[2], ((250, 50), (250, 550)));
    }

    #[test]
    fn empty_scenario_clears_walls() {
        let mut m = map(50);
        m.paint_point(10, 10, 3);
        assert_eq!(Scenario::Empty.apply(&mut m, 2), 0);
    }

    #[test]
    fn traffic_lanes_are_blocked() {
        let mut m = map(60);
        Scenario::Traffic.apply(&mut m, 0);
        // 200/600 * 60 = 20; lanes run from x=5 to x=55.
        assert!(m.is_blocked(30, 20));
        assert!(m.is_blocked(25, 30));
        assert!(!m.is_blocked(30, 30));
        assert!(!m.is_blocked(2, 20));
    }

    #[test]
    fn applying_twice_is_stable() {
        let mut m = map(80);
        let a = Scenario::Dispersion.apply(&mut m, 2);
        let b = Scenario::Dispersion.apply(&mut m, 2);
        assert_eq!(a, b);
        assert!(a > 0);
    }

    #[test]
    fn names_match_serde() {
        for s in Scenario::ALL {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{s}\""));
        }
    }
}

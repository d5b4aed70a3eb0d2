//! Reference geometry for the two grid modes
//!
//! All coordinates live on the normalized 950×950 pictograph canvas with the
//! grid centre at (475, 475). Each grid mode places its hand points (layer 1)
//! on one set of four compass locations and its layer2 points on the other
//! set, so every location has exactly one hand point and one layer2 point
//! across the two grids.
//!
//! | grid    | hand points | layer2 points |
//! |---------|-------------|---------------|
//! | diamond | N E S W     | NE SE SW NW   |
//! | box     | NE SE SW NW | N E S W       |

use crate::placement::types::{GridMode, Location, Point};

/// Side length of the square canvas
pub const CANVAS_SIZE: f64 = 950.0;

/// Centre of the grid
pub const CENTER: Point = Point { x: 475.0, y: 475.0 };

/// Which ring of reference points to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLayer {
    /// Where props are held; static and dash arrows anchor here
    Hand,
    /// Between hand points; shift arrows anchor here
    Layer2,
    /// Outer ring of the grid
    Outer,
}

impl PointLayer {
    /// The inner ring holding the locations this ring does not
    pub fn complement(self) -> PointLayer {
        match self {
            PointLayer::Hand | PointLayer::Outer => PointLayer::Layer2,
            PointLayer::Layer2 => PointLayer::Hand,
        }
    }
}

const DIAMOND_HAND: [(Location, Point); 4] = [
    (Location::N, Point { x: 475.0, y: 331.9 }),
    (Location::E, Point { x: 618.1, y: 475.0 }),
    (Location::S, Point { x: 475.0, y: 618.1 }),
    (Location::W, Point { x: 331.9, y: 475.0 }),
];

const DIAMOND_LAYER2: [(Location, Point); 4] = [
    (Location::NE, Point { x: 618.1, y: 331.9 }),
    (Location::SE, Point { x: 618.1, y: 618.1 }),
    (Location::SW, Point { x: 331.9, y: 618.1 }),
    (Location::NW, Point { x: 331.9, y: 331.9 }),
];

const DIAMOND_OUTER: [(Location, Point); 4] = [
    (Location::N, Point { x: 475.0, y: 175.0 }),
    (Location::E, Point { x: 775.0, y: 475.0 }),
    (Location::S, Point { x: 475.0, y: 775.0 }),
    (Location::W, Point { x: 175.0, y: 475.0 }),
];

const BOX_HAND: [(Location, Point); 4] = [
    (Location::NE, Point { x: 576.2, y: 373.8 }),
    (Location::SE, Point { x: 576.2, y: 576.2 }),
    (Location::SW, Point { x: 373.8, y: 576.2 }),
    (Location::NW, Point { x: 373.8, y: 373.8 }),
];

const BOX_LAYER2: [(Location, Point); 4] = [
    (Location::N, Point { x: 475.0, y: 272.6 }),
    (Location::E, Point { x: 677.4, y: 475.0 }),
    (Location::S, Point { x: 475.0, y: 677.4 }),
    (Location::W, Point { x: 272.6, y: 475.0 }),
];

const BOX_OUTER: [(Location, Point); 4] = [
    (Location::NE, Point { x: 687.1, y: 262.9 }),
    (Location::SE, Point { x: 687.1, y: 687.1 }),
    (Location::SW, Point { x: 262.9, y: 687.1 }),
    (Location::NW, Point { x: 262.9, y: 262.9 }),
];

fn table(grid_mode: GridMode, layer: PointLayer) -> &'static [(Location, Point); 4] {
    match (grid_mode, layer) {
        (GridMode::Diamond, PointLayer::Hand) => &DIAMOND_HAND,
        (GridMode::Diamond, PointLayer::Layer2) => &DIAMOND_LAYER2,
        (GridMode::Diamond, PointLayer::Outer) => &DIAMOND_OUTER,
        (GridMode::Box, PointLayer::Hand) => &BOX_HAND,
        (GridMode::Box, PointLayer::Layer2) => &BOX_LAYER2,
        (GridMode::Box, PointLayer::Outer) => &BOX_OUTER,
    }
}

/// Reference point of a location within one grid mode.
///
/// Returns `None` when the location is not part of that grid's ring.
pub fn reference_point(grid_mode: GridMode, layer: PointLayer, loc: Location) -> Option<Point> {
    table(grid_mode, layer)
        .iter()
        .find(|(l, _)| *l == loc)
        .map(|(_, p)| *p)
}

/// The four locations of a ring, in quadrant order
pub fn ring(grid_mode: GridMode, layer: PointLayer) -> [Location; 4] {
    let points = *table(grid_mode, layer);
    points.map(|(loc, _)| loc)
}

/// Anchor of a location on one grid.
///
/// Reads `layer` when the location is on that ring, else the complementary
/// inner ring of the same grid, so every location has an anchor.
pub fn anchor_point(grid_mode: GridMode, layer: PointLayer, loc: Location) -> Point {
    reference_point(grid_mode, layer, loc)
        .or_else(|| reference_point(grid_mode, layer.complement(), loc))
        .unwrap_or(CENTER)
}

/// Position of a location on a ring of one grid, with the same fallback as
/// [`anchor_point`]
pub fn ring_position(grid_mode: GridMode, layer: PointLayer, loc: Location) -> Option<usize> {
    let position = |layer| ring(grid_mode, layer).iter().position(|l| *l == loc);
    position(layer).or_else(|| position(layer.complement()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.05;

    fn distance_from_center(p: Point) -> f64 {
        ((p.x - CENTER.x).powi(2) + (p.y - CENTER.y).powi(2)).sqrt()
    }

    #[test]
    fn test_diamond_nw_layer2_point() {
        assert_eq!(
            anchor_point(GridMode::Diamond, PointLayer::Layer2, Location::NW),
            Point::new(331.9, 331.9)
        );
    }

    #[test]
    fn test_every_location_anchors_on_both_grids() {
        for grid_mode in GridMode::ALL {
            for layer in [PointLayer::Hand, PointLayer::Layer2, PointLayer::Outer] {
                for loc in Location::ALL {
                    assert_ne!(anchor_point(grid_mode, layer, loc), CENTER, "{loc} on {grid_mode}");
                    assert!(ring_position(grid_mode, layer, loc).is_some());
                }
            }
        }
    }

    #[test]
    fn test_anchor_stays_on_requested_grid() {
        // N is a box layer2 point but a diamond hand point
        assert_eq!(
            anchor_point(GridMode::Diamond, PointLayer::Layer2, Location::N),
            Point::new(475.0, 331.9)
        );
        assert_eq!(
            anchor_point(GridMode::Box, PointLayer::Layer2, Location::N),
            Point::new(475.0, 272.6)
        );
        assert_eq!(ring_position(GridMode::Diamond, PointLayer::Layer2, Location::S), Some(2));
        assert_eq!(ring_position(GridMode::Box, PointLayer::Layer2, Location::NW), Some(3));
    }

    #[test]
    fn test_hand_points_share_a_radius() {
        for grid_mode in GridMode::ALL {
            for loc in ring(grid_mode, PointLayer::Hand) {
                let r = distance_from_center(anchor_point(grid_mode, PointLayer::Hand, loc));
                assert!((r - 143.1).abs() < EPSILON, "{loc}: radius {r}");
            }
        }
    }

    #[test]
    fn test_layer2_points_share_a_radius() {
        for grid_mode in GridMode::ALL {
            for loc in ring(grid_mode, PointLayer::Layer2) {
                let r = distance_from_center(anchor_point(grid_mode, PointLayer::Layer2, loc));
                assert!((r - 202.4).abs() < EPSILON, "{loc}: radius {r}");
            }
        }
    }

    #[test]
    fn test_reference_point_outside_ring() {
        assert_eq!(
            reference_point(GridMode::Diamond, PointLayer::Hand, Location::NE),
            None
        );
        assert_eq!(
            reference_point(GridMode::Box, PointLayer::Layer2, Location::E),
            Some(Point::new(677.4, 475.0))
        );
    }

    #[test]
    fn test_ring_order() {
        assert_eq!(
            ring(GridMode::Diamond, PointLayer::Layer2),
            [Location::NE, Location::SE, Location::SW, Location::NW]
        );
        assert_eq!(
            ring(GridMode::Box, PointLayer::Layer2),
            [Location::N, Location::E, Location::S, Location::W]
        );
    }
}

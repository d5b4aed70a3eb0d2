//! Quadrant transforms for adjustment vectors
//!
//! Adjustment tables are authored for one quadrant of the grid. Placing an
//! arrow in another quadrant reorients the vector with one of the eight
//! symmetries of the square, picked from a four-slot transform set by the
//! arrow's quadrant index.
//!
//! Every transform set is a rotation orbit `[t, r∘t, r²∘t, r³∘t]` where `r`
//! is the quarter turn `(x, y) -> (-y, x)`, so the four slots always send a
//! nonzero vector to four different vectors.

use crate::grid::{ring_position, PointLayer};

use super::types::{
    Adjustment, Color, GridMode, HandpathDirection, Location, MotionData, MotionType,
    RotationDirection,
};

/// One of the eight symmetries of the square acting on `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadrantMap {
    /// `(x, y)`
    Identity,
    /// `(-y, x)`
    Rotate90,
    /// `(-x, -y)`
    Rotate180,
    /// `(y, -x)`
    Rotate270,
    /// `(-x, y)`
    NegateX,
    /// `(x, -y)`
    NegateY,
    /// `(y, x)`
    SwapAxes,
    /// `(-y, -x)`
    SwapNegate,
}

impl QuadrantMap {
    pub fn apply(&self, adjustment: Adjustment) -> Adjustment {
        let Adjustment { dx: x, dy: y } = adjustment;
        let (x, y) = match self {
            QuadrantMap::Identity => (x, y),
            QuadrantMap::Rotate90 => (-y, x),
            QuadrantMap::Rotate180 => (-x, -y),
            QuadrantMap::Rotate270 => (y, -x),
            QuadrantMap::NegateX => (-x, y),
            QuadrantMap::NegateY => (x, -y),
            QuadrantMap::SwapAxes => (y, x),
            QuadrantMap::SwapNegate => (-y, -x),
        };
        Adjustment::new(x, y)
    }
}

/// Four transforms, one per quadrant
pub type TransformSet = [QuadrantMap; 4];

use QuadrantMap::*;

pub const ORBIT_IDENTITY: TransformSet = [Identity, Rotate90, Rotate180, Rotate270];
pub const ORBIT_ROTATE90: TransformSet = [Rotate90, Rotate180, Rotate270, Identity];
pub const ORBIT_ROTATE180: TransformSet = [Rotate180, Rotate270, Identity, Rotate90];
pub const ORBIT_NEGATE_X: TransformSet = [NegateX, SwapNegate, NegateY, SwapAxes];
pub const ORBIT_NEGATE_Y: TransformSet = [NegateY, SwapAxes, NegateX, SwapNegate];
pub const ORBIT_SWAP_NEGATE: TransformSet = [SwapNegate, NegateY, SwapAxes, NegateX];

/// Index into a transform set; always 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadrantIndex(u8);

impl QuadrantIndex {
    pub const ALL: [QuadrantIndex; 4] = [
        QuadrantIndex(0),
        QuadrantIndex(1),
        QuadrantIndex(2),
        QuadrantIndex(3),
    ];

    pub fn new(index: u8) -> Option<QuadrantIndex> {
        (index < 4).then_some(QuadrantIndex(index))
    }

    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

/// Quadrant of an arrow location on the pictograph's grid.
///
/// Shift arrows index the layer2 ring, static and dash arrows index the
/// hand-point ring. A location off that ring takes its position on the
/// other inner ring of the same grid.
pub fn quadrant_index(
    grid_mode: GridMode,
    motion: &MotionData,
    location: Location,
) -> QuadrantIndex {
    let layer = if motion.motion_type.is_shift() {
        PointLayer::Layer2
    } else {
        PointLayer::Hand
    };
    ring_position(grid_mode, layer, location)
        .and_then(|i| QuadrantIndex::new(i as u8))
        .unwrap_or(QuadrantIndex(0))
}

/// Extra pictograph context that changes which transform set applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformContext {
    /// Set when both motions are zero-turn dashes; carries this arrow's colour
    pub dual_dash_zero_turns: Option<Color>,
}

/// Transform set for a motion on the pictograph's grid
pub fn transform_set(
    grid_mode: GridMode,
    motion: &MotionData,
    context: TransformContext,
) -> TransformSet {
    use RotationDirection::*;

    if let Some(color) = context.dual_dash_zero_turns {
        return match color {
            Color::Blue => ORBIT_IDENTITY,
            Color::Red => ORBIT_NEGATE_X,
        };
    }

    match motion.motion_type {
        MotionType::Pro => shift_set(grid_mode, motion.rotation_direction == Clockwise),
        MotionType::Anti => shift_set(grid_mode, motion.rotation_direction == CounterClockwise),
        MotionType::Float => shift_set(
            grid_mode,
            motion.handpath() == HandpathDirection::Clockwise,
        ),
        MotionType::Dash => match (grid_mode, motion.rotation_direction) {
            // Zero turns count as no rotation
            _ if motion.turns.is_zero() => ORBIT_IDENTITY,
            (_, NoRotation) => ORBIT_IDENTITY,
            (GridMode::Diamond, Clockwise) => ORBIT_NEGATE_Y,
            (GridMode::Diamond, CounterClockwise) => ORBIT_ROTATE180,
            (GridMode::Box, Clockwise) => ORBIT_ROTATE90,
            (GridMode::Box, CounterClockwise) => ORBIT_NEGATE_X,
        },
        MotionType::Static => match (grid_mode, motion.rotation_direction) {
            (_, NoRotation) => ORBIT_IDENTITY,
            (GridMode::Diamond, Clockwise) => ORBIT_NEGATE_Y,
            (GridMode::Diamond, CounterClockwise) => ORBIT_ROTATE180,
            (GridMode::Box, Clockwise) => ORBIT_IDENTITY,
            (GridMode::Box, CounterClockwise) => ORBIT_NEGATE_X,
        },
    }
}

/// Shift motions pick by whether the handpath runs clockwise
fn shift_set(grid_mode: GridMode, clockwise_handpath: bool) -> TransformSet {
    match (grid_mode, clockwise_handpath) {
        (GridMode::Diamond, true) => ORBIT_IDENTITY,
        (GridMode::Diamond, false) => ORBIT_SWAP_NEGATE,
        (GridMode::Box, true) => ORBIT_NEGATE_X,
        (GridMode::Box, false) => ORBIT_IDENTITY,
    }
}

/// Apply the transform of one quadrant
pub fn apply(adjustment: Adjustment, index: QuadrantIndex, set: &TransformSet) -> Adjustment {
    set[index.get()].apply(adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::types::{Orientation, Turns};

    const ALL_SETS: [TransformSet; 6] = [
        ORBIT_IDENTITY,
        ORBIT_ROTATE90,
        ORBIT_ROTATE180,
        ORBIT_NEGATE_X,
        ORBIT_NEGATE_Y,
        ORBIT_SWAP_NEGATE,
    ];

    #[test]
    fn test_every_set_is_a_rotation_orbit() {
        for set in ALL_SETS {
            for i in 0..4 {
                let v = Adjustment::new(3.0, 7.0);
                let next = Rotate90.apply(set[i].apply(v));
                assert_eq!(next, set[(i + 1) % 4].apply(v));
            }
        }
    }

    #[test]
    fn test_four_slots_give_four_distinct_vectors() {
        let vectors = [
            Adjustment::new(1.0, 0.0),
            Adjustment::new(0.0, -2.0),
            Adjustment::new(5.0, 5.0),
            Adjustment::new(-3.0, 8.0),
        ];
        for set in ALL_SETS {
            for v in vectors {
                let out: Vec<Adjustment> =
                    QuadrantIndex::ALL.iter().map(|q| apply(v, *q, &set)).collect();
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(out[i], out[j], "{set:?} collapses {v:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_passes_through_every_slot() {
        for set in ALL_SETS {
            for q in QuadrantIndex::ALL {
                let out = apply(Adjustment::ZERO, q, &set);
                assert_eq!(out.dx.abs(), 0.0);
                assert_eq!(out.dy.abs(), 0.0);
            }
        }
    }

    #[test]
    fn test_quadrant_index_bounds() {
        assert!(QuadrantIndex::new(3).is_some());
        assert!(QuadrantIndex::new(4).is_none());
    }

    fn motion(
        motion_type: MotionType,
        rot: RotationDirection,
        start: Location,
        end: Location,
    ) -> MotionData {
        MotionData::new(motion_type, rot, start, end, Turns::whole(1), Orientation::In)
    }

    #[test]
    fn test_diamond_shift_quadrants() {
        let m = motion(MotionType::Pro, RotationDirection::Clockwise, Location::W, Location::N);
        let q = |loc| quadrant_index(GridMode::Diamond, &m, loc).get();
        assert_eq!(q(Location::NE), 0);
        assert_eq!(q(Location::SE), 1);
        assert_eq!(q(Location::SW), 2);
        assert_eq!(q(Location::NW), 3);
        // Off the layer2 ring: position on the hand ring
        assert_eq!(q(Location::N), 0);
        assert_eq!(q(Location::S), 2);
    }

    #[test]
    fn test_diamond_dash_quadrants_use_hand_points() {
        let m = motion(MotionType::Dash, RotationDirection::Clockwise, Location::N, Location::S);
        assert_eq!(quadrant_index(GridMode::Diamond, &m, Location::E).get(), 1);
        assert_eq!(quadrant_index(GridMode::Diamond, &m, Location::W).get(), 3);
    }

    #[test]
    fn test_box_shift_quadrants_use_cardinals() {
        let m = motion(MotionType::Anti, RotationDirection::Clockwise, Location::NE, Location::SE);
        assert_eq!(quadrant_index(GridMode::Box, &m, Location::E).get(), 1);
    }

    #[test]
    fn test_quadrant_follows_the_given_grid() {
        // Cardinal start locations would infer diamond; the pictograph says box
        let m = motion(MotionType::Pro, RotationDirection::Clockwise, Location::W, Location::N);
        assert_eq!(quadrant_index(GridMode::Box, &m, Location::NW).get(), 3);
        assert_eq!(quadrant_index(GridMode::Box, &m, Location::E).get(), 1);
        let ctx = TransformContext::default();
        assert_eq!(transform_set(GridMode::Box, &m, ctx), ORBIT_NEGATE_X);
        assert_eq!(transform_set(GridMode::Diamond, &m, ctx), ORBIT_IDENTITY);
    }

    #[test]
    fn test_pro_and_anti_mirror_each_other() {
        let pro = motion(MotionType::Pro, RotationDirection::Clockwise, Location::W, Location::N);
        let anti = motion(
            MotionType::Anti,
            RotationDirection::CounterClockwise,
            Location::W,
            Location::N,
        );
        let ctx = TransformContext::default();
        let set = |m: &MotionData| transform_set(GridMode::Diamond, m, ctx);
        assert_eq!(set(&pro), set(&anti));
        assert_eq!(set(&pro), ORBIT_IDENTITY);

        let pro_ccw = motion(
            MotionType::Pro,
            RotationDirection::CounterClockwise,
            Location::N,
            Location::W,
        );
        assert_eq!(set(&pro_ccw), ORBIT_SWAP_NEGATE);
    }

    #[test]
    fn test_float_follows_handpath() {
        let ctx = TransformContext::default();
        let cw = motion(MotionType::Float, RotationDirection::NoRotation, Location::W, Location::N);
        let ccw = motion(
            MotionType::Float,
            RotationDirection::NoRotation,
            Location::N,
            Location::W,
        );
        assert_eq!(transform_set(GridMode::Diamond, &cw, ctx), ORBIT_IDENTITY);
        assert_eq!(transform_set(GridMode::Diamond, &ccw, ctx), ORBIT_SWAP_NEGATE);
    }

    #[test]
    fn test_zero_turn_dash_ignores_rotation_direction() {
        let ctx = TransformContext::default();
        for grid_mode in GridMode::ALL {
            let start = match grid_mode {
                GridMode::Diamond => Location::N,
                GridMode::Box => Location::NE,
            };
            for rot in [
                RotationDirection::Clockwise,
                RotationDirection::CounterClockwise,
                RotationDirection::NoRotation,
            ] {
                let dash = motion(MotionType::Dash, rot, start, start.opposite())
                    .with_turns(Turns::ZERO);
                assert_eq!(transform_set(grid_mode, &dash, ctx), ORBIT_IDENTITY, "{rot}");
            }
        }
        // Turning dashes still pick by direction
        let cw = motion(MotionType::Dash, RotationDirection::Clockwise, Location::N, Location::S);
        assert_eq!(transform_set(GridMode::Diamond, &cw, ctx), ORBIT_NEGATE_Y);
    }

    #[test]
    fn test_dual_dash_sets_depend_on_color() {
        let m = motion(MotionType::Dash, RotationDirection::NoRotation, Location::N, Location::S);
        let blue = TransformContext {
            dual_dash_zero_turns: Some(Color::Blue),
        };
        let red = TransformContext {
            dual_dash_zero_turns: Some(Color::Red),
        };
        assert_eq!(transform_set(GridMode::Diamond, &m, blue), ORBIT_IDENTITY);
        assert_eq!(transform_set(GridMode::Diamond, &m, red), ORBIT_NEGATE_X);
    }

    #[test]
    fn test_nw_transform_on_identity_orbit() {
        let v = Adjustment::new(10.0, -25.0);
        let q = QuadrantIndex::new(3).unwrap();
        assert_eq!(apply(v, q, &ORBIT_IDENTITY), Adjustment::new(-25.0, -10.0));
    }
}

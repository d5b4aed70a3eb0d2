//! Arrow location resolution
//!
//! Every motion resolves to exactly one compass location for its arrow:
//! - shift motions sit between their start and end points
//! - dash motions sit beside their path, on the side picked by spin direction
//! - static motions sit on their start point
//!
//! Pictograph context adds two collision rules. A zero-turn dash sharing the
//! pictograph with a shift moves to the side away from the shift arrow, and a
//! trailing dash landing on the leading dash's location moves opposite it.

use super::types::{
    Color, GridMode, Location, MotionData, MotionType, PictographData, RotationDirection,
};

/// Unordered start/end pairs of shift motions and the location between them
const SHIFT_PAIRS: [(Location, Location, Location); 8] = [
    (Location::N, Location::E, Location::NE),
    (Location::E, Location::S, Location::SE),
    (Location::S, Location::W, Location::SW),
    (Location::W, Location::N, Location::NW),
    (Location::NE, Location::NW, Location::N),
    (Location::NE, Location::SE, Location::E),
    (Location::SW, Location::SE, Location::S),
    (Location::NW, Location::SW, Location::W),
];

/// Dash arrow locations: (start, clockwise, counter-clockwise, no rotation)
const DIAMOND_DASH: [(Location, Location, Location, Location); 4] = [
    (Location::N, Location::E, Location::W, Location::E),
    (Location::E, Location::S, Location::N, Location::S),
    (Location::S, Location::W, Location::E, Location::W),
    (Location::W, Location::N, Location::S, Location::N),
];

const BOX_DASH: [(Location, Location, Location, Location); 4] = [
    (Location::NE, Location::SE, Location::NW, Location::SE),
    (Location::SE, Location::SW, Location::NE, Location::SW),
    (Location::SW, Location::NW, Location::SE, Location::NW),
    (Location::NW, Location::NE, Location::SW, Location::NE),
];

/// Location of an isolated motion's arrow
pub fn resolve(motion: &MotionData) -> Location {
    match motion.motion_type {
        MotionType::Pro | MotionType::Anti | MotionType::Float => shift_location(motion),
        MotionType::Dash => dash_location(motion),
        MotionType::Static => motion.start_loc,
    }
}

/// Location of one arrow within its pictograph
pub fn resolve_arrow(pictograph: &PictographData, color: Color) -> Location {
    let motion = pictograph.motion(color);
    let other = pictograph.motion(color.other());

    if motion.motion_type == MotionType::Dash
        && other.motion_type.is_shift()
        && motion.turns.is_zero()
    {
        let shift_loc = resolve(other);
        return dash_location_avoiding(motion, shift_loc).unwrap_or_else(|| resolve(motion));
    }

    if pictograph.is_dual_dash() && !color.is_leading() {
        let leading = resolve(other);
        let own = resolve(motion);
        return if own == leading { own.opposite() } else { own };
    }

    resolve(motion)
}

/// Location between a shift motion's start and end, or the start location
/// when the pair is not adjacent.
pub fn shift_location(motion: &MotionData) -> Location {
    let (a, b) = (motion.start_loc, motion.end_loc);
    SHIFT_PAIRS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, loc)| *loc)
        .unwrap_or(motion.start_loc)
}

/// Location beside a dash path.
///
/// Zero turns count as no rotation. A start location outside the dash
/// tables cannot happen since the two tables cover all eight points;
/// a non-opposite end falls back to the start location.
pub fn dash_location(motion: &MotionData) -> Location {
    if motion.end_loc != motion.start_loc.opposite() {
        return motion.start_loc;
    }
    let table = match motion.grid_mode() {
        GridMode::Diamond => &DIAMOND_DASH,
        GridMode::Box => &BOX_DASH,
    };
    let Some(&(_, cw, ccw, no_rot)) = table.iter().find(|(start, ..)| *start == motion.start_loc)
    else {
        return motion.start_loc;
    };
    if motion.turns.is_zero() {
        return no_rot;
    }
    match motion.rotation_direction {
        RotationDirection::Clockwise => cw,
        RotationDirection::CounterClockwise => ccw,
        RotationDirection::NoRotation => no_rot,
    }
}

/// The side of the dash path facing away from an already-placed shift arrow.
///
/// Returns `None` when both sides are equally far from it.
fn dash_location_avoiding(motion: &MotionData, shift_loc: Location) -> Option<Location> {
    if motion.end_loc != motion.start_loc.opposite() {
        return None;
    }
    let left = motion.start_loc.rotated(-2);
    let right = motion.start_loc.rotated(2);
    let (dl, dr) = (left.steps_to(shift_loc), right.steps_to(shift_loc));
    match dl.cmp(&dr) {
        std::cmp::Ordering::Greater => Some(left),
        std::cmp::Ordering::Less => Some(right),
        std::cmp::Ordering::Equal => None,
    }
}

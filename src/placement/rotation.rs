//! Glyph rotation angles and the horizontal mirror flag
//!
//! Angles use the SVG convention: degrees, clockwise positive, with the
//! glyph's authored orientation at 0°.

use super::types::{
    HandpathDirection, Location, MotionData, MotionType, Orientation, RotationDirection,
};

/// Angle of a dash or static glyph that does not rotate
pub const NO_ROTATION_ANGLE: f64 = 0.0;

/// Shift glyph angles for a clockwise handpath, by arrow location
fn shift_cw_angle(loc: Location) -> f64 {
    match loc {
        Location::NE => 0.0,
        Location::SE => 90.0,
        Location::SW => 180.0,
        Location::NW => 270.0,
        Location::N => 315.0,
        Location::E => 45.0,
        Location::S => 135.0,
        Location::W => 225.0,
    }
}

/// Shift glyph angles for a counter-clockwise handpath, by arrow location
fn shift_ccw_angle(loc: Location) -> f64 {
    match loc {
        Location::NE => 270.0,
        Location::SE => 0.0,
        Location::SW => 90.0,
        Location::NW => 180.0,
        Location::N => 225.0,
        Location::E => 315.0,
        Location::S => 45.0,
        Location::W => 135.0,
    }
}

fn dash_angle(rot: RotationDirection, loc: Location) -> f64 {
    match rot {
        RotationDirection::Clockwise => normalize(loc.bearing() + 270.0),
        RotationDirection::CounterClockwise => normalize(loc.bearing() + 90.0),
        RotationDirection::NoRotation => NO_ROTATION_ANGLE,
    }
}

fn static_angle(rot: RotationDirection, loc: Location) -> f64 {
    match rot {
        RotationDirection::Clockwise => loc.bearing(),
        RotationDirection::CounterClockwise => normalize(360.0 - loc.bearing()),
        RotationDirection::NoRotation => NO_ROTATION_ANGLE,
    }
}

fn normalize(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Handpath a shift glyph is drawn along.
///
/// PRO spins with the hand, ANTI against it; FLOAT and rotation-less shifts
/// read the handpath from their start and end points.
fn shift_handpath_clockwise(motion: &MotionData) -> bool {
    match (motion.motion_type, motion.rotation_direction) {
        (MotionType::Pro, RotationDirection::Clockwise)
        | (MotionType::Anti, RotationDirection::CounterClockwise) => true,
        (MotionType::Pro, RotationDirection::CounterClockwise)
        | (MotionType::Anti, RotationDirection::Clockwise) => false,
        _ => motion.handpath() == HandpathDirection::Clockwise,
    }
}

/// Rotation of the arrow glyph at its resolved location
pub fn arrow_rotation(motion: &MotionData, location: Location) -> f64 {
    match motion.motion_type {
        MotionType::Pro | MotionType::Anti | MotionType::Float => {
            if shift_handpath_clockwise(motion) {
                shift_cw_angle(location)
            } else {
                shift_ccw_angle(location)
            }
        }
        MotionType::Dash if motion.turns.is_zero() => NO_ROTATION_ANGLE,
        MotionType::Dash => dash_angle(motion.rotation_direction, location),
        MotionType::Static => static_angle(motion.rotation_direction, location),
    }
}

/// Whether the glyph is drawn mirrored.
///
/// ANTI mirrors when spinning clockwise, every other type when spinning
/// counter-clockwise; no rotation never mirrors.
pub fn is_mirrored(motion_type: MotionType, rotation_direction: RotationDirection) -> bool {
    match rotation_direction {
        RotationDirection::NoRotation => false,
        RotationDirection::Clockwise => motion_type == MotionType::Anti,
        RotationDirection::CounterClockwise => motion_type != MotionType::Anti,
    }
}

/// Rotation of the prop at its end location.
///
/// OUT points away from the grid centre and IN toward it; CLOCK and COUNTER
/// sit a quarter turn either side of OUT. 0° faces east.
pub fn prop_rotation(end_loc: Location, end_orientation: Orientation) -> f64 {
    let out = normalize(end_loc.bearing() - 90.0);
    let offset = match end_orientation {
        Orientation::Out => 0.0,
        Orientation::Clock => 90.0,
        Orientation::In => 180.0,
        Orientation::Counter => 270.0,
    };
    normalize(out + offset)
}

//! End orientation of a prop after a motion
//!
//! Whole turns keep the prop inside its radial/non-radial pair: PRO and
//! STATIC flip on odd turns, ANTI and DASH flip on even turns. Half turns
//! always leave the pair, landing on the side picked by the spin direction.
//! FLOAT motions carry no quantized turns and follow the handpath instead.

use super::types::{HandpathDirection, MotionData, MotionType, Orientation, RotationDirection};

/// Orientation the prop ends in, given the orientation it started in
pub fn end_orientation(motion: &MotionData, start: Orientation) -> Orientation {
    if motion.motion_type == MotionType::Float {
        return float_orientation(start, motion.handpath());
    }

    match motion.turns.halves() {
        // A float sentinel on a non-float motion counts as one switch
        None => start.switched(),
        Some(h) if h % 2 == 0 => whole_turn_orientation(motion.motion_type, h / 2, start),
        Some(h) => half_turn_orientation(motion, h, start),
    }
}

fn whole_turn_orientation(motion_type: MotionType, turns: u8, start: Orientation) -> Orientation {
    let even = turns % 2 == 0;
    let flips = match motion_type {
        MotionType::Pro | MotionType::Static => !even,
        MotionType::Anti | MotionType::Dash => even,
        MotionType::Float => false,
    };
    if flips {
        start.switched()
    } else {
        start
    }
}

fn half_turn_orientation(motion: &MotionData, halves: u8, start: Orientation) -> Orientation {
    use Orientation::*;
    use RotationDirection::*;

    // 0.5, 2.5 land on one side; 1.5 lands on the other
    let first = halves % 4 == 1;
    let pick = |a: Orientation, b: Orientation| if first { a } else { b };

    let anti_like = matches!(motion.motion_type, MotionType::Anti | MotionType::Dash);
    match (anti_like, start, motion.rotation_direction) {
        (_, _, NoRotation) => start,

        (true, In, Clockwise) => pick(Clock, Counter),
        (true, In, CounterClockwise) => pick(Counter, Clock),
        (true, Out, Clockwise) => pick(Counter, Clock),
        (true, Out, CounterClockwise) => pick(Clock, Counter),
        (true, Clock, Clockwise) => pick(Out, In),
        (true, Clock, CounterClockwise) => pick(In, Out),
        (true, Counter, Clockwise) => pick(In, Out),
        (true, Counter, CounterClockwise) => pick(Out, In),

        (false, In, Clockwise) => pick(Counter, Clock),
        (false, In, CounterClockwise) => pick(Clock, Counter),
        (false, Out, Clockwise) => pick(Clock, Counter),
        (false, Out, CounterClockwise) => pick(Counter, Clock),
        (false, Clock, Clockwise) => pick(In, Out),
        (false, Clock, CounterClockwise) => pick(Out, In),
        (false, Counter, Clockwise) => pick(Out, In),
        (false, Counter, CounterClockwise) => pick(In, Out),
    }
}

fn float_orientation(start: Orientation, handpath: HandpathDirection) -> Orientation {
    use HandpathDirection::*;
    use Orientation::*;

    match (start, handpath) {
        (In, Clockwise) => Clock,
        (In, CounterClockwise) => Counter,
        (Out, Clockwise) => Counter,
        (Out, CounterClockwise) => Clock,
        (Clock, Clockwise) => Out,
        (Clock, CounterClockwise) => In,
        (Counter, Clockwise) => In,
        (Counter, CounterClockwise) => Out,
        (_, Dash | Static) => start,
    }
}

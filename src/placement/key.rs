//! Lookup keys for the adjustment tables
//!
//! Default placements are indexed by a placement key such as
//! `pro_to_layer1_alpha`; special placements by orientation class and a
//! turns tuple such as `same_0_1.5`. Both strings must match the authored
//! JSON byte for byte.

use std::fmt;

use super::types::{
    Color, Letter, LetterType, MotionData, MotionType, PictographData, RotationDirection,
};

/// Start-orientation class of a pictograph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrientationClass {
    /// Both props start radial
    FromLayer1,
    /// Both props start non-radial
    FromLayer2,
    /// One of each
    FromLayer3,
}

impl OrientationClass {
    pub const ALL: [OrientationClass; 3] = [
        OrientationClass::FromLayer1,
        OrientationClass::FromLayer2,
        OrientationClass::FromLayer3,
    ];

    pub fn of(pictograph: &PictographData) -> OrientationClass {
        let blue = pictograph.blue.motion.start_orientation.is_radial();
        let red = pictograph.red.motion.start_orientation.is_radial();
        match (blue, red) {
            (true, true) => OrientationClass::FromLayer1,
            (false, false) => OrientationClass::FromLayer2,
            _ => OrientationClass::FromLayer3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationClass::FromLayer1 => "from_layer1",
            OrientationClass::FromLayer2 => "from_layer2",
            OrientationClass::FromLayer3 => "from_layer3",
        }
    }

    pub fn parse(s: &str) -> Option<OrientationClass> {
        OrientationClass::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for OrientationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two motions in turns-tuple order for a letter type
fn ordered_motions(pictograph: &PictographData) -> (&MotionData, &MotionData) {
    let blue = &pictograph.blue.motion;
    let red = &pictograph.red.motion;
    match pictograph.letter_type {
        LetterType::Type1 if blue.motion_type != red.motion_type => {
            first_where(blue, red, |m| m.motion_type == MotionType::Pro)
        }
        LetterType::Type2 | LetterType::Type3 => {
            first_where(blue, red, |m| m.motion_type.is_shift())
        }
        LetterType::Type4 => first_where(blue, red, |m| m.motion_type == MotionType::Dash),
        _ => (blue, red),
    }
}

/// Put the motion matching `pred` first; blue first when both or neither match
fn first_where<'a>(
    blue: &'a MotionData,
    red: &'a MotionData,
    pred: impl Fn(&MotionData) -> bool,
) -> (&'a MotionData, &'a MotionData) {
    if pred(red) && !pred(blue) {
        (red, blue)
    } else {
        (blue, red)
    }
}

/// Turns tuple for special-placement lookup: `{same|opp}_{a}_{b}`.
///
/// "opp" only when both motions spin, in different directions.
pub fn turns_tuple(pictograph: &PictographData) -> String {
    let (a, b) = ordered_motions(pictograph);
    let spinning = |m: &MotionData| m.rotation_direction != RotationDirection::NoRotation;
    let direction = if spinning(a) && spinning(b) && a.rotation_direction != b.rotation_direction {
        "opp"
    } else {
        "same"
    };
    format!("{direction}_{}_{}", a.turns, b.turns)
}

/// Layer part of a placement key, from both end orientations
fn layer_key(motion: &MotionData, pictograph: &PictographData) -> &'static str {
    let blue = pictograph.blue.motion.end_orientation().is_radial();
    let red = pictograph.red.motion.end_orientation().is_radial();
    match (blue, red) {
        (true, true) => "layer1",
        (false, false) => "layer2",
        _ if motion.end_orientation().is_radial() => "layer3_radial",
        _ => "layer3_nonradial",
    }
}

/// Suffix for letters whose defaults are authored separately
fn letter_suffix(letter: &Letter) -> Option<&'static str> {
    match letter.as_str() {
        "α" => Some("_alpha"),
        "β" => Some("_beta"),
        "Γ" => Some("_gamma"),
        _ if letter.is_dash() => Some("_dash"),
        _ => None,
    }
}

/// Candidate placement keys, most specific first.
///
/// The last candidate is always the bare motion type.
pub fn placement_key_candidates(color: Color, pictograph: &PictographData) -> Vec<String> {
    let motion = pictograph.motion(color);
    let base = format!("{}_to_{}", motion.motion_type, layer_key(motion, pictograph));
    let mut keys = Vec::with_capacity(3);
    if let Some(suffix) = letter_suffix(&pictograph.letter) {
        keys.push(format!("{base}{suffix}"));
    }
    keys.push(base);
    keys.push(motion.motion_type.as_str().to_string());
    keys
}

/// Most specific placement key the table knows about
pub fn placement_key(
    color: Color,
    pictograph: &PictographData,
    is_registered: impl Fn(&str) -> bool,
) -> String {
    let mut candidates = placement_key_candidates(color, pictograph);
    let fallback = candidates.pop().unwrap_or_default();
    candidates
        .into_iter()
        .find(|key| is_registered(key))
        .unwrap_or(fallback)
}

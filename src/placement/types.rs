//! Core types for the placement engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point on the pictograph canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate this point by an adjustment vector
    pub fn offset(&self, adjustment: Adjustment) -> Point {
        Point::new(self.x + adjustment.dx, self.y + adjustment.dy)
    }
}

/// A bounding box representing the spatial extent of a glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Move the box by the given amounts
    pub fn translate(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// A positional adjustment in canvas units.
///
/// Serialized as a two-element array `[dx, dy]`, the layout used by the
/// placement JSON files.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Adjustment {
    pub dx: f64,
    pub dy: f64,
}

impl Adjustment {
    pub const ZERO: Adjustment = Adjustment { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl From<[f64; 2]> for Adjustment {
    fn from([dx, dy]: [f64; 2]) -> Self {
        Self { dx, dy }
    }
}

impl From<Adjustment> for [f64; 2] {
    fn from(adjustment: Adjustment) -> Self {
        [adjustment.dx, adjustment.dy]
    }
}

/// The kind of path a prop travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionType {
    Pro,
    Anti,
    Float,
    Dash,
    Static,
}

impl MotionType {
    pub const ALL: [MotionType; 5] = [
        MotionType::Pro,
        MotionType::Anti,
        MotionType::Float,
        MotionType::Dash,
        MotionType::Static,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MotionType::Pro => "pro",
            MotionType::Anti => "anti",
            MotionType::Float => "float",
            MotionType::Dash => "dash",
            MotionType::Static => "static",
        }
    }

    /// Shift motions travel between adjacent grid points
    pub fn is_shift(&self) -> bool {
        matches!(self, MotionType::Pro | MotionType::Anti | MotionType::Float)
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction the prop spins in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum RotationDirection {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
    #[serde(rename = "no_rot")]
    NoRotation,
}

impl RotationDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
            RotationDirection::NoRotation => "no_rot",
        }
    }

    /// Left/right reflection swaps the two spin directions
    pub fn reflected(&self) -> RotationDirection {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
            RotationDirection::NoRotation => RotationDirection::NoRotation,
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the eight compass points of the grid.
///
/// Declaration order runs clockwise from north; [`Location::bearing`]
/// relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Location {
    pub const ALL: [Location; 8] = [
        Location::N,
        Location::NE,
        Location::E,
        Location::SE,
        Location::S,
        Location::SW,
        Location::W,
        Location::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::N => "n",
            Location::NE => "ne",
            Location::E => "e",
            Location::SE => "se",
            Location::S => "s",
            Location::SW => "sw",
            Location::W => "w",
            Location::NW => "nw",
        }
    }

    pub fn parse(s: &str) -> Option<Location> {
        Location::ALL.into_iter().find(|loc| loc.as_str() == s)
    }

    /// Compass bearing in degrees (north = 0, clockwise positive)
    pub fn bearing(&self) -> f64 {
        self.step() as f64 * 45.0
    }

    fn step(&self) -> i32 {
        *self as i32
    }

    /// Rotate by a number of 45° steps (positive = clockwise)
    pub fn rotated(&self, steps: i32) -> Location {
        Location::ALL[(self.step() + steps).rem_euclid(8) as usize]
    }

    pub fn opposite(&self) -> Location {
        self.rotated(4)
    }

    /// True for N, E, S and W
    pub fn is_cardinal(&self) -> bool {
        self.step() % 2 == 0
    }

    /// Smallest number of 45° steps between two locations (0..=4)
    pub fn steps_to(&self, other: Location) -> u8 {
        let diff = (other.step() - self.step()).rem_euclid(8);
        diff.min(8 - diff) as u8
    }

    /// Mirror image across the vertical axis
    pub fn reflected(&self) -> Location {
        Location::ALL[(8 - self.step()).rem_euclid(8) as usize]
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The prop's facing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    In,
    Out,
    Clock,
    Counter,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::In => "in",
            Orientation::Out => "out",
            Orientation::Clock => "clock",
            Orientation::Counter => "counter",
        }
    }

    /// IN and OUT are radial, CLOCK and COUNTER are not
    pub fn is_radial(&self) -> bool {
        matches!(self, Orientation::In | Orientation::Out)
    }

    /// Flip within the radial or non-radial pair
    pub fn switched(&self) -> Orientation {
        match self {
            Orientation::In => Orientation::Out,
            Orientation::Out => Orientation::In,
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of the eight grid locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    Diamond,
    Box,
}

impl GridMode {
    pub const ALL: [GridMode; 2] = [GridMode::Diamond, GridMode::Box];

    pub fn as_str(&self) -> &'static str {
        match self {
            GridMode::Diamond => "diamond",
            GridMode::Box => "box",
        }
    }

    /// Grid whose hand points include this location
    pub fn of_hand_point(loc: Location) -> GridMode {
        if loc.is_cardinal() {
            GridMode::Diamond
        } else {
            GridMode::Box
        }
    }

    /// Grid whose layer2 points include this location
    pub fn of_layer2_point(loc: Location) -> GridMode {
        if loc.is_cardinal() {
            GridMode::Box
        } else {
            GridMode::Diamond
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which hand a motion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }

    pub fn other(&self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Blue leads, red trails
    pub fn is_leading(&self) -> bool {
        matches!(self, Color::Blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantized rotation count, or the unquantified float sentinel.
///
/// Whole and half turns are stored as a count of half steps so table
/// keys never depend on float formatting. Every constructor keeps the
/// count within [0, 3] turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTurns", into = "RawTurns")]
pub struct Turns(TurnsRepr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TurnsRepr {
    Halves(u8),
    Float,
}

/// Largest number of half steps (3 full turns)
const MAX_HALVES: u8 = 6;

impl Turns {
    pub const ZERO: Turns = Turns(TurnsRepr::Halves(0));
    pub const FLOAT: Turns = Turns(TurnsRepr::Float);

    /// Whole turns, clamped to the valid range
    pub fn whole(turns: u8) -> Turns {
        Turns::from_halves(turns.saturating_mul(2))
    }

    /// A count of half steps, clamped to the valid range
    pub fn from_halves(halves: u8) -> Turns {
        Turns(TurnsRepr::Halves(halves.min(MAX_HALVES)))
    }

    /// Build from a numeric value, rounding to the nearest half step and
    /// clamping to [0, 3].
    ///
    /// Out-of-range input is a caller contract violation; debug builds log
    /// a warning when clamping changes the value.
    pub fn clamped(value: f64) -> Turns {
        let halves = if value.is_finite() {
            (value * 2.0).round().clamp(0.0, MAX_HALVES as f64)
        } else {
            0.0
        };
        if cfg!(debug_assertions) && halves / 2.0 != value {
            log::warn!("turns value {value} clamped to {}", halves / 2.0);
        }
        Turns::from_halves(halves as u8)
    }

    /// Half steps, or `None` for the float sentinel
    pub fn halves(&self) -> Option<u8> {
        match self.0 {
            TurnsRepr::Halves(h) => Some(h),
            TurnsRepr::Float => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == TurnsRepr::Halves(0)
    }

    pub fn is_float(&self) -> bool {
        self.0 == TurnsRepr::Float
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.halves().map(|h| h as f64 / 2.0)
    }
}

impl Default for Turns {
    fn default() -> Self {
        Turns::ZERO
    }
}

/// Canonical table form: "0", "0.5", "1" ... "3", and "fl" for float
impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.halves() {
            Some(h) if h % 2 == 0 => write!(f, "{}", h / 2),
            Some(h) => write!(f, "{}.5", h / 2),
            None => f.write_str("fl"),
        }
    }
}

/// Serialized turns: a number, or the string "fl"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawTurns {
    Number(f64),
    Text(String),
}

impl TryFrom<RawTurns> for Turns {
    type Error = String;

    fn try_from(raw: RawTurns) -> Result<Self, Self::Error> {
        match raw {
            RawTurns::Number(value) => Ok(Turns::clamped(value)),
            RawTurns::Text(text) if text == "fl" || text == "float" => Ok(Turns::FLOAT),
            RawTurns::Text(text) => text
                .parse::<f64>()
                .map(Turns::clamped)
                .map_err(|_| format!("invalid turns value '{text}'")),
        }
    }
}

impl From<Turns> for RawTurns {
    fn from(turns: Turns) -> Self {
        match turns.as_f64() {
            Some(value) => RawTurns::Number(value),
            None => RawTurns::Text("fl".to_string()),
        }
    }
}

/// Structural class of a letter, supplied by the letter classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LetterType {
    /// Dual shift
    Type1,
    /// Shift + static
    Type2,
    /// Shift + dash
    Type3,
    /// Dash + static
    Type4,
    /// Dual dash
    Type5,
    /// Dual static
    Type6,
}

/// A letter identity; a trailing '-' marks the dash variant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Letter(pub String);

impl Letter {
    pub fn new(letter: impl Into<String>) -> Self {
        Self(letter.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dash(&self) -> bool {
        self.0.ends_with('-')
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction the hand travels around the grid between start and end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandpathDirection {
    Clockwise,
    CounterClockwise,
    /// Start and end are opposite points
    Dash,
    /// Start and end coincide
    Static,
}

impl HandpathDirection {
    pub fn between(start: Location, end: Location) -> HandpathDirection {
        match (end as i32 - start as i32).rem_euclid(8) {
            0 => HandpathDirection::Static,
            4 => HandpathDirection::Dash,
            1..=3 => HandpathDirection::Clockwise,
            _ => HandpathDirection::CounterClockwise,
        }
    }
}

/// One prop motion. Values are never mutated; an edit produces a new one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MotionData {
    pub motion_type: MotionType,
    pub rotation_direction: RotationDirection,
    pub start_loc: Location,
    pub end_loc: Location,
    #[serde(default)]
    pub turns: Turns,
    pub start_orientation: Orientation,
    /// Stored end orientation; derived from the other fields when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_orientation: Option<Orientation>,
}

impl MotionData {
    pub fn new(
        motion_type: MotionType,
        rotation_direction: RotationDirection,
        start_loc: Location,
        end_loc: Location,
        turns: Turns,
        start_orientation: Orientation,
    ) -> Self {
        Self {
            motion_type,
            rotation_direction,
            start_loc,
            end_loc,
            turns,
            start_orientation,
            end_orientation: None,
        }
    }

    /// Copy of this motion with different turns
    pub fn with_turns(&self, turns: Turns) -> Self {
        Self {
            turns,
            end_orientation: None,
            ..self.clone()
        }
    }

    /// Stored end orientation, or the calculated one
    pub fn end_orientation(&self) -> Orientation {
        self.end_orientation.unwrap_or_else(|| {
            super::orientation::end_orientation(self, self.start_orientation)
        })
    }

    /// Grid mode implied by the location set this motion starts from
    pub fn grid_mode(&self) -> GridMode {
        GridMode::of_hand_point(self.start_loc)
    }

    pub fn handpath(&self) -> HandpathDirection {
        HandpathDirection::between(self.start_loc, self.end_loc)
    }
}

/// A motion tagged with its colour
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowData {
    pub color: Color,
    pub motion: MotionData,
}

impl ArrowData {
    pub fn new(color: Color, motion: MotionData) -> Self {
        Self { color, motion }
    }
}

/// One beat: two simultaneous motions plus the letter assigned to them
#[derive(Debug, Clone, PartialEq)]
pub struct PictographData {
    pub grid_mode: GridMode,
    pub letter: Letter,
    pub letter_type: LetterType,
    pub blue: ArrowData,
    pub red: ArrowData,
}

impl PictographData {
    pub fn new(
        grid_mode: GridMode,
        letter: Letter,
        letter_type: LetterType,
        blue: MotionData,
        red: MotionData,
    ) -> Self {
        Self {
            grid_mode,
            letter,
            letter_type,
            blue: ArrowData::new(Color::Blue, blue),
            red: ArrowData::new(Color::Red, red),
        }
    }

    pub fn arrow(&self, color: Color) -> &ArrowData {
        match color {
            Color::Blue => &self.blue,
            Color::Red => &self.red,
        }
    }

    pub fn motion(&self, color: Color) -> &MotionData {
        &self.arrow(color).motion
    }

    /// The single motion of a given type, if exactly one matches
    pub fn only_motion(&self, pred: impl Fn(&MotionData) -> bool) -> Option<&ArrowData> {
        match (pred(&self.blue.motion), pred(&self.red.motion)) {
            (true, false) => Some(&self.blue),
            (false, true) => Some(&self.red),
            _ => None,
        }
    }

    /// One dash motion and one shift motion (the Type3 scenario)
    pub fn is_dash_with_shift(&self) -> bool {
        let (a, b) = (self.blue.motion.motion_type, self.red.motion.motion_type);
        (a == MotionType::Dash && b.is_shift()) || (b == MotionType::Dash && a.is_shift())
    }

    /// Both motions are dashes (the Type5 scenario)
    pub fn is_dual_dash(&self) -> bool {
        self.blue.motion.motion_type == MotionType::Dash
            && self.red.motion.motion_type == MotionType::Dash
    }

    /// Copy with one arrow's motion replaced
    pub fn with_motion(&self, color: Color, motion: MotionData) -> Self {
        let mut next = self.clone();
        match color {
            Color::Blue => next.blue.motion = motion,
            Color::Red => next.red.motion = motion,
        }
        next
    }
}

/// Final placement of one arrow glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedArrow {
    /// Top-left placement point, after centre compensation
    pub x: f64,
    pub y: f64,
    /// Clockwise rotation in degrees
    pub rotation_deg: f64,
    /// Draw mirrored horizontally
    pub mirrored: bool,
    /// Resolved arrow location
    pub location: Location,
    /// Loose bounds of the rotated glyph
    pub bounds: BoundingBox,
}

//! Pictograph Placement - arrow placement for prop-motion pictographs
//!
//! This library positions the arrow glyphs of a pictograph: one beat of a
//! movement sequence with two simultaneous prop motions (blue and red) on a
//! diamond or box grid.
//!
//! # Example
//!
//! ```rust
//! use pictograph_placement::{
//!     place_pictograph, GridMode, Letter, LetterType, Location, MotionData, MotionType,
//!     Orientation, PictographData, RotationDirection, Turns,
//! };
//!
//! let blue = MotionData::new(
//!     MotionType::Pro,
//!     RotationDirection::Clockwise,
//!     Location::W,
//!     Location::N,
//!     Turns::whole(1),
//!     Orientation::In,
//! );
//! let red = MotionData::new(
//!     MotionType::Pro,
//!     RotationDirection::Clockwise,
//!     Location::E,
//!     Location::S,
//!     Turns::whole(1),
//!     Orientation::In,
//! );
//! let pictograph =
//!     PictographData::new(GridMode::Diamond, Letter::new("A"), LetterType::Type1, blue, red);
//!
//! let placed = place_pictograph(&pictograph);
//! assert_eq!(placed.blue.arrow.location, Location::NW);
//! assert_eq!(placed.red.arrow.location, Location::SE);
//! ```

use std::sync::OnceLock;

pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod placement;

pub use config::{ConfigError, GlyphSize, PlacementConfig};
pub use error::TableError;
pub use input::{PictographFile, PictographFileError};
pub use placement::{
    AdjustmentSource, ArrowPlacer, JsonSpecialWriter, OrientationClass, PlacedMotion,
    PlacedPictograph, PlacementAuthoring, PlacementTables, PlacementTrace, TableSource, TableStore,
};
pub use placement::types::*;

static DEFAULT_PLACER: OnceLock<ArrowPlacer> = OnceLock::new();

/// Process-wide placer with the bundled tables and default configuration.
///
/// Tables are parsed on first use and shared by every later call.
pub fn default_placer() -> &'static ArrowPlacer {
    DEFAULT_PLACER.get_or_init(ArrowPlacer::default)
}

/// Place both arrows of a pictograph with the bundled tables and default
/// configuration
pub fn place_pictograph(pictograph: &PictographData) -> PlacedPictograph {
    default_placer().place_pictograph(pictograph)
}

/// Place one arrow with the bundled tables and default configuration
pub fn place(arrow: &ArrowData, pictograph: &PictographData) -> PlacedArrow {
    default_placer().place(arrow, pictograph)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn motion(start: Location, end: Location) -> MotionData {
        MotionData::new(
            MotionType::Anti,
            RotationDirection::CounterClockwise,
            start,
            end,
            Turns::whole(2),
            Orientation::Out,
        )
    }

    fn pictograph() -> PictographData {
        PictographData::new(
            GridMode::Diamond,
            Letter::new("B"),
            LetterType::Type1,
            motion(Location::S, Location::E),
            motion(Location::N, Location::W),
        )
    }

    #[test]
    fn test_place_is_deterministic() {
        let p = pictograph();
        let first = place(&p.blue, &p);
        let second = place(&p.blue, &p);
        assert_eq!(first, second);
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
    }

    #[test]
    fn test_place_pictograph_matches_single_placements() {
        let p = pictograph();
        let both = place_pictograph(&p);
        assert_eq!(both.blue.arrow, place(&p.blue, &p));
        assert_eq!(both.red.arrow, place(&p.red, &p));
    }

    #[test]
    fn test_convenience_calls_share_one_table_snapshot() {
        let p = pictograph();
        let before = default_placer().store().snapshot();
        place_pictograph(&p);
        place(&p.red, &p);
        let after = default_placer().store().snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert!(std::ptr::eq(default_placer(), default_placer()));
    }

    #[test]
    fn test_anti_counter_clockwise_is_not_mirrored() {
        let p = pictograph();
        let placed = place_pictograph(&p);
        assert!(!placed.blue.arrow.mirrored);
        assert_eq!(placed.blue.arrow.location, Location::SE);
        assert_eq!(placed.red.arrow.location, Location::NW);
    }
}

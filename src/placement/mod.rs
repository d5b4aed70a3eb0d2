//! Arrow placement for pictographs
//!
//! Given one motion of a pictograph, this module computes where its arrow
//! glyph goes on the 950×950 canvas, how far it is rotated and whether it is
//! drawn mirrored. The pipeline lives in [`engine`]; every other submodule
//! is one pure step of it.
//!
//! Placement never fails. Missing table rows, unknown location pairs and
//! unreadable asset files all degrade to a zero adjustment or a fallback
//! location.

mod assets;
pub mod engine;
pub mod key;
pub mod location;
pub mod mirror;
pub mod orientation;
pub mod quadrant;
pub mod rotation;
pub mod tables;
pub mod transform;
pub mod types;

pub use engine::{AdjustmentSource, ArrowPlacer, PlacedMotion, PlacedPictograph, PlacementTrace};
pub use key::OrientationClass;
pub use mirror::{JsonSpecialWriter, PlacementAuthoring};
pub use tables::{
    DefaultPlacements, PlacementTables, SpecialPlacements, SpecialQuery, TableSource, TableStore,
};
pub use types::*;

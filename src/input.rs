//! Pictograph descriptions in TOML
//!
//! ```toml
//! letter = "A"
//! letter_type = "Type1"
//!
//! [blue]
//! motion_type = "pro"
//! rotation_direction = "cw"
//! start_loc = "w"
//! end_loc = "n"
//! turns = 1
//! start_orientation = "in"
//!
//! [red]
//! motion_type = "pro"
//! rotation_direction = "cw"
//! start_loc = "e"
//! end_loc = "s"
//! turns = 1
//! start_orientation = "in"
//! ```
//!
//! `grid_mode` may be given; otherwise it is inferred from the blue start
//! location.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::placement::types::{GridMode, Letter, LetterType, MotionData, PictographData};

#[derive(Error, Debug)]
pub enum PictographFileError {
    #[error("Failed to read pictograph file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse pictograph TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PictographFile {
    pub grid_mode: Option<GridMode>,
    pub letter: Letter,
    pub letter_type: LetterType,
    pub blue: MotionData,
    pub red: MotionData,
}

impl PictographFile {
    pub fn from_file(path: &Path) -> Result<Self, PictographFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PictographFileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_pictograph(self) -> PictographData {
        let grid_mode = self.grid_mode.unwrap_or_else(|| self.blue.grid_mode());
        PictographData::new(grid_mode, self.letter, self.letter_type, self.blue, self.red)
    }
}

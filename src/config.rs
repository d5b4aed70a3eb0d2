//! Configuration for the placement engine
//!
//! Loaded from TOML or built in code. The config is handed to
//! [`ArrowPlacer::new`](crate::placement::ArrowPlacer::new); nothing reads
//! it from a global.
//!
//! ```toml
//! data_dir = "assets/placements"
//!
//! [glyph]
//! width = 50.0
//! height = 100.0
//!
//! [glyph_overrides.static]
//! width = 40.0
//! height = 80.0
//!
//! [mirrors]
//! B = "A"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::placement::types::MotionType;

/// Errors that can occur when loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Unrotated size of an arrow glyph in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GlyphSize {
    pub width: f64,
    pub height: f64,
}

impl GlyphSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for GlyphSize {
    fn default() -> Self {
        Self::new(50.0, 100.0)
    }
}

/// Configuration options for arrow placement
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Directory holding the placement JSON files; bundled tables when unset
    pub data_dir: Option<PathBuf>,

    /// Glyph size used for centre compensation
    pub glyph: GlyphSize,

    /// Glyph sizes for single motion types (`[glyph_overrides.static]`)
    pub glyph_overrides: BTreeMap<MotionType, GlyphSize>,

    /// Mirrored letter -> the authored letter it reflects
    pub mirrors: BTreeMap<String, String>,
}

impl PlacementConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read tables from a directory instead of the bundled copies
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the default glyph size
    pub fn with_glyph_size(mut self, width: f64, height: f64) -> Self {
        self.glyph = GlyphSize::new(width, height);
        self
    }

    /// Set the glyph size for one motion type
    pub fn with_glyph_override(
        mut self,
        motion_type: MotionType,
        width: f64,
        height: f64,
    ) -> Self {
        self.glyph_overrides
            .insert(motion_type, GlyphSize::new(width, height));
        self
    }

    /// Declare `letter` as the mirror image of `canonical`
    pub fn with_mirror(mut self, letter: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.mirrors.insert(letter.into(), canonical.into());
        self
    }

    /// Glyph size for a motion type
    pub fn glyph_size(&self, motion_type: MotionType) -> GlyphSize {
        self.glyph_overrides
            .get(&motion_type)
            .copied()
            .unwrap_or(self.glyph)
    }
}

//! Error types for loading and authoring placement tables
//!
//! Placement itself never fails: table misses and unreadable files degrade to
//! zero adjustments. These errors surface only from the strict loaders and
//! the authoring tools that rewrite the JSON files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// The file could not be read or written
    #[error("failed to access placement file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid placement JSON
    #[error("malformed placement file '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The letter has no configured mirror counterpart
    #[error("letter '{letter}' is not configured as a mirror of another letter")]
    UnknownMirror { letter: String },

    /// The mirror's canonical letter has no authored entries
    #[error("letter '{canonical}' has no special placements to mirror into '{letter}'")]
    MissingCanonical { letter: String, canonical: String },
}

impl TableError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

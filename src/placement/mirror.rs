//! Left/right reflection of special placements
//!
//! A mirrored letter's entries are its canonical letter's entries seen in a
//! vertical mirror: every `dx` changes sign and every compass or spin token
//! inside a key swaps sides (`e`/`w`, `ne`/`nw`, `se`/`sw`, `cw`/`ccw`).
//! The rule is its own inverse.
//!
//! Lookups derive mirrored answers on the fly (see
//! [`SpecialPlacements::lookup`](super::tables::SpecialPlacements::lookup)).
//! Writing a derivation to disk is an authoring step behind
//! [`PlacementAuthoring`]; the placement engine never writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::TableError;

use super::tables::{
    special_file_name, table_path, LetterPlacements, PlacementTables, SpecialEntry, SpecialGrid,
    SpecialPlacements, SpecialValue, TableStore,
};
use super::types::{Adjustment, GridMode};

fn reflect_token(token: &str) -> &str {
    match token {
        "e" => "w",
        "w" => "e",
        "ne" => "nw",
        "nw" => "ne",
        "se" => "sw",
        "sw" => "se",
        "cw" => "ccw",
        "ccw" => "cw",
        other => other,
    }
}

/// Reflect every underscore-separated token of a key
pub fn reflect_key(key: &str) -> String {
    key.split('_').map(reflect_token).collect::<Vec<_>>().join("_")
}

pub fn reflect_adjustment(adjustment: Adjustment) -> Adjustment {
    Adjustment::new(-adjustment.dx, adjustment.dy)
}

pub fn reflect_value(value: &SpecialValue) -> SpecialValue {
    match value {
        SpecialValue::Offset(adjustment) => SpecialValue::Offset(reflect_adjustment(*adjustment)),
        SpecialValue::Nested(map) => SpecialValue::Nested(
            map.iter()
                .map(|(key, inner)| (reflect_key(key), reflect_value(inner)))
                .collect(),
        ),
    }
}

pub fn reflect_entry(entry: &SpecialEntry) -> SpecialEntry {
    entry
        .iter()
        .map(|(key, value)| (reflect_key(key), reflect_value(value)))
        .collect()
}

/// Reflect everything authored for one letter
pub fn reflect_letter(placements: &LetterPlacements) -> LetterPlacements {
    placements
        .iter()
        .map(|(tuple, entry)| (reflect_key(tuple), reflect_entry(entry)))
        .collect()
}

/// Write access to the special placement files.
///
/// Implementations only persist; callers reload the [`TableStore`]
/// afterwards to make the change visible to placement.
pub trait PlacementAuthoring {
    /// Current content of a grid's special file; empty when it does not exist
    fn read_grid(&self, grid_mode: GridMode) -> Result<SpecialGrid, TableError>;

    /// Replace a grid's special file
    fn write_grid(&self, grid_mode: GridMode, grid: &SpecialGrid) -> Result<(), TableError>;

    /// Store `letter` as the reflection of `canonical` in every orientation
    /// class that has entries for `canonical`.
    ///
    /// Returns the number of classes written.
    fn write_mirrored(
        &self,
        grid_mode: GridMode,
        letter: &str,
        canonical: &str,
    ) -> Result<usize, TableError> {
        let mut grid = self.read_grid(grid_mode)?;
        let mut written = 0;
        for letters in grid.values_mut() {
            let Some(source) = letters.get(canonical) else {
                continue;
            };
            let mirrored = reflect_letter(source);
            letters.insert(letter.to_string(), mirrored);
            written += 1;
        }
        if written == 0 {
            return Err(TableError::MissingCanonical {
                letter: letter.to_string(),
                canonical: canonical.to_string(),
            });
        }
        self.write_grid(grid_mode, &grid)?;
        log::info!(
            "wrote mirrored placements for '{letter}' from '{canonical}' ({written} classes)"
        );
        Ok(written)
    }
}

/// Authoring backend that edits the JSON files under a data directory
#[derive(Debug, Clone)]
pub struct JsonSpecialWriter {
    data_dir: PathBuf,
}

impl JsonSpecialWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, grid_mode: GridMode) -> PathBuf {
        table_path(&self.data_dir, grid_mode, &special_file_name(grid_mode))
    }
}

impl PlacementAuthoring for JsonSpecialWriter {
    fn read_grid(&self, grid_mode: GridMode) -> Result<SpecialGrid, TableError> {
        let path = self.path(grid_mode);
        match std::fs::read_to_string(&path) {
            Ok(json) => SpecialPlacements::parse_grid(&json).map_err(|e| TableError::json(path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SpecialGrid::new()),
            Err(e) => Err(TableError::io(path, e)),
        }
    }

    fn write_grid(&self, grid_mode: GridMode, grid: &SpecialGrid) -> Result<(), TableError> {
        let path = self.path(grid_mode);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TableError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(grid).map_err(|e| TableError::json(&path, e))?;
        std::fs::write(&path, json).map_err(|e| TableError::io(path, e))
    }
}

/// Persist the configured mirror of `letter`, then reload the store
pub fn author_mirrored_letter(
    authoring: &impl PlacementAuthoring,
    store: &TableStore,
    mirrors: &BTreeMap<String, String>,
    grid_mode: GridMode,
    letter: &str,
) -> Result<Arc<PlacementTables>, TableError> {
    let canonical = mirrors.get(letter).ok_or_else(|| TableError::UnknownMirror {
        letter: letter.to_string(),
    })?;
    authoring.write_mirrored(grid_mode, letter, canonical)?;
    Ok(store.reload())
}

//! Default and special adjustment tables
//!
//! Both tables are parsed from JSON once and then only read. A file that is
//! missing or malformed leaves its cell empty, so lookups in it fall back to
//! a zero adjustment instead of failing placement.
//!
//! ## Layout on disk
//!
//! ```text
//! <dir>/diamond/default_diamond_pro_placements.json   key -> turns -> [dx, dy]
//! <dir>/diamond/special_diamond_placements.json       class -> letter -> tuple -> attr -> [dx, dy]
//! <dir>/box/...
//! ```
//!
//! The same files ship inside the crate and back [`TableSource::Bundled`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::TableError;

use super::assets;
use super::key::OrientationClass;
use super::mirror;
use super::types::{Adjustment, Color, GridMode, Location, MotionType, RotationDirection, Turns};

/// turns string -> adjustment
pub type TurnsRow = BTreeMap<String, Adjustment>;

/// placement key -> turns row; the content of one default file
pub type DefaultCell = BTreeMap<String, TurnsRow>;

/// Generic adjustments per grid mode and motion type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultPlacements {
    cells: BTreeMap<(GridMode, MotionType), DefaultCell>,
}

impl DefaultPlacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the content of one default file
    pub fn parse_cell(json: &str) -> Result<DefaultCell, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, grid_mode: GridMode, motion_type: MotionType, cell: DefaultCell) {
        self.cells.insert((grid_mode, motion_type), cell);
    }

    pub fn cell(&self, grid_mode: GridMode, motion_type: MotionType) -> Option<&DefaultCell> {
        self.cells.get(&(grid_mode, motion_type))
    }

    /// Whether a placement key has its own row
    pub fn contains_key(&self, grid_mode: GridMode, motion_type: MotionType, key: &str) -> bool {
        self.cell(grid_mode, motion_type)
            .is_some_and(|cell| cell.contains_key(key))
    }

    /// Adjustment for a placement key and turns value.
    ///
    /// Falls back to the bare motion-type row when the key has none, and to
    /// zero when the row has no entry for these turns.
    pub fn get(
        &self,
        grid_mode: GridMode,
        motion_type: MotionType,
        placement_key: &str,
        turns: Turns,
    ) -> Adjustment {
        let Some(cell) = self.cell(grid_mode, motion_type) else {
            return Adjustment::ZERO;
        };
        cell.get(placement_key)
            .or_else(|| cell.get(motion_type.as_str()))
            .and_then(|row| row.get(&turns.to_string()))
            .copied()
            .unwrap_or(Adjustment::ZERO)
    }

    /// Total number of rows across all cells
    pub fn row_count(&self) -> usize {
        self.cells.values().map(|cell| cell.len()).sum()
    }
}

/// A special adjustment, or a map descending by location or spin direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecialValue {
    Offset(Adjustment),
    Nested(BTreeMap<String, SpecialValue>),
}

/// attribute (motion type or colour) -> value
pub type SpecialEntry = BTreeMap<String, SpecialValue>;

/// turns tuple -> entry; everything authored for one letter
pub type LetterPlacements = BTreeMap<String, SpecialEntry>;

/// orientation class -> letter -> placements; the content of one special file
pub type SpecialGrid = BTreeMap<String, BTreeMap<String, LetterPlacements>>;

/// Everything needed to find one special adjustment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialQuery<'a> {
    pub grid_mode: GridMode,
    pub letter: &'a str,
    pub orientation_class: OrientationClass,
    pub turns_tuple: &'a str,
    pub motion_type: MotionType,
    /// Attribute tried when the motion type has no entry
    pub color: Option<Color>,
    /// Key for descending into nested values
    pub location: Option<Location>,
    /// Key for descending into nested values, after the location
    pub rotation_direction: Option<RotationDirection>,
}

impl<'a> SpecialQuery<'a> {
    pub fn new(
        grid_mode: GridMode,
        letter: &'a str,
        orientation_class: OrientationClass,
        turns_tuple: &'a str,
        motion_type: MotionType,
    ) -> Self {
        Self {
            grid_mode,
            letter,
            orientation_class,
            turns_tuple,
            motion_type,
            color: None,
            location: None,
            rotation_direction: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_rotation_direction(mut self, rotation_direction: RotationDirection) -> Self {
        self.rotation_direction = Some(rotation_direction);
        self
    }

    /// The same query seen in the mirror, asked of another letter
    fn reflected<'b>(&self, letter: &'b str) -> SpecialQuery<'b>
    where
        'a: 'b,
    {
        SpecialQuery {
            letter,
            location: self.location.map(|l| l.reflected()),
            rotation_direction: self.rotation_direction.map(|r| r.reflected()),
            ..*self
        }
    }
}

/// Per-letter overrides, with on-demand derivation for mirrored letters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialPlacements {
    grids: BTreeMap<GridMode, SpecialGrid>,
    /// mirrored letter -> canonical letter
    mirrors: BTreeMap<String, String>,
}

impl SpecialPlacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the content of one special file
    pub fn parse_grid(json: &str) -> Result<SpecialGrid, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_mirrors(mut self, mirrors: BTreeMap<String, String>) -> Self {
        self.mirrors = mirrors;
        self
    }

    pub fn insert(&mut self, grid_mode: GridMode, grid: SpecialGrid) {
        self.grids.insert(grid_mode, grid);
    }

    pub fn grid(&self, grid_mode: GridMode) -> Option<&SpecialGrid> {
        self.grids.get(&grid_mode)
    }

    /// Authored placements of one letter
    pub fn letter_placements(
        &self,
        grid_mode: GridMode,
        orientation_class: OrientationClass,
        letter: &str,
    ) -> Option<&LetterPlacements> {
        self.grids
            .get(&grid_mode)?
            .get(orientation_class.as_str())?
            .get(letter)
    }

    /// Special adjustment keyed by motion type
    pub fn get(
        &self,
        grid_mode: GridMode,
        letter: &str,
        orientation_class: OrientationClass,
        turns_tuple: &str,
        motion_type: MotionType,
    ) -> Option<Adjustment> {
        self.lookup(&SpecialQuery::new(
            grid_mode,
            letter,
            orientation_class,
            turns_tuple,
            motion_type,
        ))
    }

    /// Special adjustment for a full query.
    ///
    /// A letter with no authored entries that is configured as the mirror
    /// of another letter is answered from that letter through the
    /// reflection rule.
    pub fn lookup(&self, query: &SpecialQuery<'_>) -> Option<Adjustment> {
        if let Some(placements) =
            self.letter_placements(query.grid_mode, query.orientation_class, query.letter)
        {
            return lookup_in(placements, query);
        }
        let canonical = self.mirrors.get(query.letter)?;
        let placements =
            self.letter_placements(query.grid_mode, query.orientation_class, canonical)?;
        lookup_in(placements, &query.reflected(canonical)).map(mirror::reflect_adjustment)
    }

    /// Number of authored letters across all grids and classes
    pub fn letter_count(&self) -> usize {
        self.grids
            .values()
            .flat_map(|grid| grid.values())
            .map(|letters| letters.len())
            .sum()
    }
}

fn lookup_in(placements: &LetterPlacements, query: &SpecialQuery<'_>) -> Option<Adjustment> {
    let entry = placements.get(query.turns_tuple)?;
    let value = entry
        .get(query.motion_type.as_str())
        .or_else(|| query.color.and_then(|c| entry.get(c.as_str())))?;
    resolve_value(value, query)
}

fn resolve_value(value: &SpecialValue, query: &SpecialQuery<'_>) -> Option<Adjustment> {
    match value {
        SpecialValue::Offset(adjustment) => Some(*adjustment),
        SpecialValue::Nested(map) => {
            let by_location = query.location.and_then(|l| map.get(l.as_str()));
            let by_rotation = query.rotation_direction.and_then(|r| map.get(r.as_str()));
            resolve_value(by_location.or(by_rotation)?, query)
        }
    }
}

/// Where table files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Files compiled into the crate
    Bundled,
    /// A directory with one subdirectory per grid mode
    Directory(PathBuf),
}

pub fn default_file_name(grid_mode: GridMode, motion_type: MotionType) -> String {
    format!("default_{grid_mode}_{motion_type}_placements.json")
}

pub fn special_file_name(grid_mode: GridMode) -> String {
    format!("special_{grid_mode}_placements.json")
}

/// Path of a table file under a data directory
pub fn table_path(dir: &Path, grid_mode: GridMode, file_name: &str) -> PathBuf {
    dir.join(grid_mode.as_str()).join(file_name)
}

impl TableSource {
    fn read(&self, grid_mode: GridMode, file_name: &str) -> Result<Cow<'static, str>, TableError> {
        match self {
            TableSource::Bundled => assets::bundled(grid_mode, file_name)
                .map(Cow::Borrowed)
                .ok_or_else(|| {
                    TableError::io(
                        file_name,
                        std::io::Error::new(std::io::ErrorKind::NotFound, "not bundled"),
                    )
                }),
            TableSource::Directory(dir) => {
                let path = table_path(dir, grid_mode, file_name);
                std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|e| TableError::io(path, e))
            }
        }
    }

    fn display_path(&self, grid_mode: GridMode, file_name: &str) -> PathBuf {
        match self {
            TableSource::Bundled => PathBuf::from(grid_mode.as_str()).join(file_name),
            TableSource::Directory(dir) => table_path(dir, grid_mode, file_name),
        }
    }

    fn load_default_cell(
        &self,
        grid_mode: GridMode,
        motion_type: MotionType,
    ) -> Result<DefaultCell, TableError> {
        let name = default_file_name(grid_mode, motion_type);
        let json = self.read(grid_mode, &name)?;
        DefaultPlacements::parse_cell(&json)
            .map_err(|e| TableError::json(self.display_path(grid_mode, &name), e))
    }

    fn load_special_grid(&self, grid_mode: GridMode) -> Result<SpecialGrid, TableError> {
        let name = special_file_name(grid_mode);
        let json = self.read(grid_mode, &name)?;
        SpecialPlacements::parse_grid(&json)
            .map_err(|e| TableError::json(self.display_path(grid_mode, &name), e))
    }
}

/// Log a failed cell load; the cell stays empty
fn degrade(err: TableError) {
    if err.is_not_found() {
        log::debug!("{err}");
    } else {
        log::warn!("{err}; using empty adjustments");
    }
}

/// One immutable snapshot of both tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementTables {
    pub defaults: DefaultPlacements,
    pub specials: SpecialPlacements,
}

impl PlacementTables {
    /// Load every cell, leaving unreadable cells empty
    pub fn load(source: &TableSource, mirrors: &BTreeMap<String, String>) -> Self {
        let mut defaults = DefaultPlacements::new();
        let mut specials = SpecialPlacements::new().with_mirrors(mirrors.clone());
        for grid_mode in GridMode::ALL {
            for motion_type in MotionType::ALL {
                match source.load_default_cell(grid_mode, motion_type) {
                    Ok(cell) => defaults.insert(grid_mode, motion_type, cell),
                    Err(e) => degrade(e),
                }
            }
            match source.load_special_grid(grid_mode) {
                Ok(grid) => specials.insert(grid_mode, grid),
                Err(e) => degrade(e),
            }
        }
        Self { defaults, specials }
    }

    /// Load every cell, failing on the first malformed file.
    ///
    /// Missing files still count as empty cells.
    pub fn load_strict(
        source: &TableSource,
        mirrors: &BTreeMap<String, String>,
    ) -> Result<Self, TableError> {
        let mut defaults = DefaultPlacements::new();
        let mut specials = SpecialPlacements::new().with_mirrors(mirrors.clone());
        for grid_mode in GridMode::ALL {
            for motion_type in MotionType::ALL {
                match source.load_default_cell(grid_mode, motion_type) {
                    Ok(cell) => defaults.insert(grid_mode, motion_type, cell),
                    Err(e) if e.is_not_found() => {}
                    Err(e) => return Err(e),
                }
            }
            match source.load_special_grid(grid_mode) {
                Ok(grid) => specials.insert(grid_mode, grid),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(Self { defaults, specials })
    }

    /// Tables compiled into the crate
    pub fn bundled() -> Self {
        Self::load(&TableSource::Bundled, &BTreeMap::new())
    }
}

/// Shared, swappable handle to the current table snapshot.
///
/// Readers clone an `Arc` of the snapshot and never see a half-updated
/// table; a reload parses everything first and then swaps the whole
/// snapshot.
#[derive(Debug, Clone)]
pub struct TableStore {
    source: TableSource,
    mirrors: BTreeMap<String, String>,
    current: Arc<RwLock<Arc<PlacementTables>>>,
}

impl TableStore {
    pub fn new(source: TableSource, mirrors: BTreeMap<String, String>) -> Self {
        let tables = PlacementTables::load(&source, &mirrors);
        Self {
            source,
            mirrors,
            current: Arc::new(RwLock::new(Arc::new(tables))),
        }
    }

    /// Store around tables built in memory; reloads read the bundled files
    pub fn from_tables(tables: PlacementTables) -> Self {
        Self {
            source: TableSource::Bundled,
            mirrors: tables.specials.mirrors.clone(),
            current: Arc::new(RwLock::new(Arc::new(tables))),
        }
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<PlacementTables> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot wholesale
    pub fn replace(&self, tables: PlacementTables) {
        let next = Arc::new(tables);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Re-read every file from the source and swap in the result
    pub fn reload(&self) -> Arc<PlacementTables> {
        let tables = Arc::new(PlacementTables::load(&self.source, &self.mirrors));
        log::info!(
            "reloaded placement tables: {} default rows, {} special letters",
            tables.defaults.row_count(),
            tables.specials.letter_count()
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = tables.clone();
        tables
    }
}

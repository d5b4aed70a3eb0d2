//! Arrow positioning
//!
//! [`ArrowPlacer`] turns one arrow of a pictograph into a [`PlacedArrow`]:
//!
//! 1. Resolve the arrow's grid location
//! 2. Start from the grid reference point of that location
//! 3. Take the special adjustment for the letter, else the default one
//! 4. Reorient the adjustment for the arrow's quadrant
//! 5. Offset the reference point and centre the rotated glyph on it
//! 6. Attach rotation angle and mirror flag
//!
//! Every step falls back instead of failing, so placement always produces
//! a result. Each call reads one snapshot of the tables; a concurrent reload
//! never mixes old and new data within a call.

use std::borrow::Cow;

use crate::config::PlacementConfig;
use crate::grid::{anchor_point, PointLayer};

use super::key::{placement_key, turns_tuple, OrientationClass};
use super::location::resolve_arrow;
use super::quadrant::{self, quadrant_index, transform_set, QuadrantIndex, TransformContext};
use super::rotation::{arrow_rotation, is_mirrored, prop_rotation};
use super::tables::{PlacementTables, SpecialQuery, TableSource, TableStore};
use super::transform::center_glyph;
use super::types::{
    Adjustment, ArrowData, Color, Location, Orientation, PictographData, PlacedArrow, Point,
};

/// Which table an adjustment came from
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentSource {
    Special {
        orientation_class: OrientationClass,
        turns_tuple: String,
    },
    Default {
        placement_key: String,
    },
}

/// Every intermediate value of one placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementTrace {
    pub location: Location,
    /// Grid reference point before adjustment
    pub initial: Point,
    pub source: AdjustmentSource,
    /// Adjustment as read from the table
    pub raw_adjustment: Adjustment,
    pub quadrant: QuadrantIndex,
    /// Adjustment after the quadrant transform
    pub adjustment: Adjustment,
    /// Where the glyph centre lands
    pub target: Point,
    pub placed: PlacedArrow,
}

/// One placed motion with its prop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedMotion {
    pub arrow: PlacedArrow,
    pub end_orientation: Orientation,
    /// Clockwise degrees, 0° facing east
    pub prop_rotation_deg: f64,
}

/// Both placed motions of a pictograph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPictograph {
    pub blue: PlacedMotion,
    pub red: PlacedMotion,
}

impl PlacedPictograph {
    pub fn get(&self, color: Color) -> &PlacedMotion {
        match color {
            Color::Blue => &self.blue,
            Color::Red => &self.red,
        }
    }
}

/// Places arrow glyphs against a shared table snapshot
#[derive(Debug, Clone)]
pub struct ArrowPlacer {
    config: PlacementConfig,
    store: TableStore,
}

impl ArrowPlacer {
    /// Create a placer, loading tables from the configured source
    pub fn new(config: PlacementConfig) -> Self {
        let source = match &config.data_dir {
            Some(dir) => TableSource::Directory(dir.clone()),
            None => TableSource::Bundled,
        };
        let store = TableStore::new(source, config.mirrors.clone());
        Self { config, store }
    }

    /// Create a placer sharing an existing table store
    pub fn with_store(config: PlacementConfig, store: TableStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Place one arrow of a pictograph
    pub fn place(&self, arrow: &ArrowData, pictograph: &PictographData) -> PlacedArrow {
        self.trace(arrow, pictograph).placed
    }

    /// Place one arrow and keep every intermediate value
    pub fn trace(&self, arrow: &ArrowData, pictograph: &PictographData) -> PlacementTrace {
        let tables = self.store.snapshot();
        self.trace_with(&tables, arrow, pictograph)
    }

    /// Place both arrows of a pictograph from one table snapshot
    pub fn place_pictograph(&self, pictograph: &PictographData) -> PlacedPictograph {
        let tables = self.store.snapshot();
        let place = |color: Color| {
            let arrow = pictograph.arrow(color);
            let placed = self.trace_with(&tables, arrow, pictograph).placed;
            let end_orientation = arrow.motion.end_orientation();
            PlacedMotion {
                arrow: placed,
                end_orientation,
                prop_rotation_deg: prop_rotation(arrow.motion.end_loc, end_orientation),
            }
        };

        // The dash rule inside location resolution already sees the shift arrow
        PlacedPictograph {
            blue: place(Color::Blue),
            red: place(Color::Red),
        }
    }

    fn trace_with(
        &self,
        tables: &PlacementTables,
        arrow: &ArrowData,
        pictograph: &PictographData,
    ) -> PlacementTrace {
        let color = arrow.color;
        let pictograph: Cow<'_, PictographData> = if pictograph.arrow(color) == arrow {
            Cow::Borrowed(pictograph)
        } else {
            Cow::Owned(pictograph.with_motion(color, arrow.motion.clone()))
        };
        let motion = &arrow.motion;
        let grid_mode = pictograph.grid_mode;

        let location = resolve_arrow(&pictograph, color);
        let layer = if motion.motion_type.is_shift() {
            PointLayer::Layer2
        } else {
            PointLayer::Hand
        };
        let initial = anchor_point(grid_mode, layer, location);

        let (source, raw_adjustment) = self.lookup_adjustment(tables, &pictograph, color, location);

        let quadrant = quadrant_index(grid_mode, motion, location);
        let context = TransformContext {
            dual_dash_zero_turns: (pictograph.is_dual_dash()
                && pictograph.blue.motion.turns.is_zero()
                && pictograph.red.motion.turns.is_zero())
            .then_some(color),
        };
        let set = transform_set(grid_mode, motion, context);
        let adjustment = quadrant::apply(raw_adjustment, quadrant, &set);

        let target = initial.offset(adjustment);
        let rotation_deg = arrow_rotation(motion, location);
        let glyph = self.config.glyph_size(motion.motion_type);
        let (top_left, bounds) = center_glyph(target, glyph, rotation_deg);

        PlacementTrace {
            location,
            initial,
            source,
            raw_adjustment,
            quadrant,
            adjustment,
            target,
            placed: PlacedArrow {
                x: top_left.x,
                y: top_left.y,
                rotation_deg,
                mirrored: is_mirrored(motion.motion_type, motion.rotation_direction),
                location,
                bounds,
            },
        }
    }

    /// Special adjustment when the letter has one, default otherwise
    fn lookup_adjustment(
        &self,
        tables: &PlacementTables,
        pictograph: &PictographData,
        color: Color,
        location: Location,
    ) -> (AdjustmentSource, Adjustment) {
        let motion = pictograph.motion(color);
        let grid_mode = pictograph.grid_mode;
        let orientation_class = OrientationClass::of(pictograph);
        let tuple = turns_tuple(pictograph);

        let query = SpecialQuery::new(
            grid_mode,
            pictograph.letter.as_str(),
            orientation_class,
            &tuple,
            motion.motion_type,
        )
        .with_color(color)
        .with_location(location)
        .with_rotation_direction(motion.rotation_direction);

        if let Some(adjustment) = tables.specials.lookup(&query) {
            log::debug!(
                "special adjustment for {} {color} {orientation_class} {tuple}: {adjustment:?}",
                pictograph.letter
            );
            let source = AdjustmentSource::Special {
                orientation_class,
                turns_tuple: tuple,
            };
            return (source, adjustment);
        }

        let key = placement_key(color, pictograph, |k| {
            tables.defaults.contains_key(grid_mode, motion.motion_type, k)
        });
        let adjustment = tables
            .defaults
            .get(grid_mode, motion.motion_type, &key, motion.turns);
        (AdjustmentSource::Default { placement_key: key }, adjustment)
    }
}

impl Default for ArrowPlacer {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::placement::tables::{DefaultPlacements, SpecialPlacements};
    use crate::placement::types::{
        GridMode, Letter, LetterType, MotionData, MotionType, RotationDirection, Turns,
    };
    use pretty_assertions::assert_eq;

    fn pro_w_to_n() -> MotionData {
        MotionData::new(
            MotionType::Pro,
            RotationDirection::Clockwise,
            Location::W,
            Location::N,
            Turns::whole(1),
            Orientation::In,
        )
    }

    fn anti_e_to_s() -> MotionData {
        MotionData::new(
            MotionType::Anti,
            RotationDirection::Clockwise,
            Location::E,
            Location::S,
            Turns::ZERO,
            Orientation::In,
        )
    }

    fn pictograph() -> PictographData {
        PictographData::new(
            GridMode::Diamond,
            Letter::new("C"),
            LetterType::Type1,
            pro_w_to_n(),
            anti_e_to_s(),
        )
    }

    fn tables(special: Option<&str>) -> PlacementTables {
        let mut defaults = DefaultPlacements::new();
        defaults.insert(
            GridMode::Diamond,
            MotionType::Pro,
            DefaultPlacements::parse_cell(r#"{ "pro": { "1": [10, -25] } }"#).unwrap(),
        );
        let mut specials = SpecialPlacements::new();
        if let Some(json) = special {
            specials.insert(GridMode::Diamond, SpecialPlacements::parse_grid(json).unwrap());
        }
        PlacementTables { defaults, specials }
    }

    fn placer(tables: PlacementTables) -> ArrowPlacer {
        ArrowPlacer::with_store(PlacementConfig::default(), TableStore::from_tables(tables))
    }

    #[test]
    fn test_default_adjustment_path() {
        let p = pictograph();
        let trace = placer(tables(None)).trace(&p.blue, &p);

        assert_eq!(trace.location, Location::NW);
        assert_eq!(trace.initial, Point::new(331.9, 331.9));
        assert_eq!(
            trace.source,
            AdjustmentSource::Default {
                placement_key: "pro".to_string()
            }
        );
        assert_eq!(trace.raw_adjustment, Adjustment::new(10.0, -25.0));
        assert_eq!(trace.quadrant.get(), 3);
        assert_eq!(trace.adjustment, Adjustment::new(-25.0, -10.0));
        assert_eq!(trace.target, Point::new(306.9, 321.9));
        assert_eq!(trace.placed.rotation_deg, 270.0);
        assert!(!trace.placed.mirrored);
    }

    #[test]
    fn test_special_overrides_default() {
        let special = r#"{
            "from_layer1": { "C": { "same_1_0": { "pro": [4, 6] } } }
        }"#;
        let p = pictograph();
        let trace = placer(tables(Some(special))).trace(&p.blue, &p);
        assert!(matches!(trace.source, AdjustmentSource::Special { .. }));
        assert_eq!(trace.raw_adjustment, Adjustment::new(4.0, 6.0));
    }

    #[test]
    fn test_special_nested_by_location() {
        let special = r#"{
            "from_layer1": { "C": { "same_1_0": { "pro": { "nw": [4, 6], "ne": [9, 9] } } } }
        }"#;
        let p = pictograph();
        let trace = placer(tables(Some(special))).trace(&p.blue, &p);
        assert_eq!(trace.raw_adjustment, Adjustment::new(4.0, 6.0));
    }

    #[test]
    fn test_mirrored_letter_uses_canonical_entry() {
        let special = r#"{
            "from_layer1": { "C": { "same_1_0": { "pro": [4, 6] } } }
        }"#;
        let mut t = tables(Some(special));
        t.specials = t
            .specials
            .with_mirrors(BTreeMap::from([("D".to_string(), "C".to_string())]));
        let mut p = pictograph();
        p.letter = Letter::new("D");
        let trace = placer(t).trace(&p.blue, &p);
        assert_eq!(trace.raw_adjustment, Adjustment::new(-4.0, 6.0));
    }

    #[test]
    fn test_missing_tables_fall_back_to_zero() {
        let p = pictograph();
        let trace = placer(PlacementTables::default()).trace(&p.red, &p);
        assert_eq!(trace.raw_adjustment, Adjustment::ZERO);
        assert_eq!(trace.target, trace.initial);
    }

    #[test]
    fn test_placed_point_centres_glyph() {
        let p = pictograph();
        let trace = placer(tables(None)).trace(&p.blue, &p);
        assert_eq!(trace.placed.bounds.center().x.round(), trace.target.x.round());
        assert_eq!(trace.placed.bounds.center().y.round(), trace.target.y.round());
    }

    #[test]
    fn test_arrow_replaces_pictograph_motion() {
        let p = pictograph();
        let edited = ArrowData::new(Color::Blue, pro_w_to_n().with_turns(Turns::ZERO));
        let trace = placer(tables(None)).trace(&edited, &p);
        // The table has no "0" entry for pro
        assert_eq!(trace.raw_adjustment, Adjustment::ZERO);
    }

    #[test]
    fn test_place_pictograph_reports_props() {
        let p = pictograph();
        let placed = placer(tables(None)).place_pictograph(&p);
        assert_eq!(placed.blue.end_orientation, Orientation::Out);
        assert_eq!(placed.blue.prop_rotation_deg, 270.0);
        assert_eq!(placed.red.end_orientation, Orientation::Out);
        assert_eq!(placed.get(Color::Red).arrow.location, Location::SE);
    }

    #[test]
    fn test_unpaired_shift_anchors_on_pictograph_grid() {
        // N -> S is not an adjacent pair, so the arrow sits on its start
        let straight = MotionData::new(
            MotionType::Pro,
            RotationDirection::Clockwise,
            Location::N,
            Location::S,
            Turns::whole(1),
            Orientation::In,
        );
        let p = pictograph().with_motion(Color::Blue, straight);
        let trace = placer(tables(None)).trace(&p.blue, &p);
        assert_eq!(trace.location, Location::N);
        assert_eq!(trace.initial, Point::new(475.0, 331.9));
        assert_eq!(trace.quadrant.get(), 0);
    }

    #[test]
    fn test_box_pictograph_reads_box_geometry() {
        let mut p = pictograph();
        p.grid_mode = GridMode::Box;
        let trace = placer(tables(None)).trace(&p.blue, &p);
        assert_eq!(trace.location, Location::NW);
        assert_eq!(trace.initial, Point::new(373.8, 373.8));
        assert_eq!(trace.quadrant.get(), 3);
        // No box tables loaded
        assert_eq!(trace.raw_adjustment, Adjustment::ZERO);
    }

    #[test]
    fn test_zero_turn_dash_ignores_rotation_direction() {
        let dash = |rot| {
            MotionData::new(
                MotionType::Dash,
                rot,
                Location::N,
                Location::S,
                Turns::ZERO,
                Orientation::In,
            )
        };
        let mut t = PlacementTables::default();
        t.defaults.insert(
            GridMode::Diamond,
            MotionType::Dash,
            DefaultPlacements::parse_cell(r#"{ "dash": { "0": [-5, 45] } }"#).unwrap(),
        );
        let placer = placer(t);
        let still = MotionData::new(
            MotionType::Static,
            RotationDirection::NoRotation,
            Location::E,
            Location::E,
            Turns::ZERO,
            Orientation::In,
        );
        let place = |rot| {
            let p = PictographData::new(
                GridMode::Diamond,
                Letter::new("Λ-"),
                LetterType::Type4,
                dash(rot),
                still.clone(),
            );
            placer.trace(&p.blue, &p)
        };

        let reference = place(RotationDirection::NoRotation);
        assert_eq!(reference.location, Location::E);
        assert_eq!(reference.adjustment, Adjustment::new(-45.0, -5.0));
        for rot in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let trace = place(rot);
            assert_eq!(trace.location, reference.location);
            assert_eq!(trace.adjustment, reference.adjustment);
            assert_eq!(trace.target, reference.target);
            assert_eq!(trace.placed.x, reference.placed.x);
            assert_eq!(trace.placed.y, reference.placed.y);
            assert_eq!(trace.placed.rotation_deg, reference.placed.rotation_deg);
        }
    }

    #[test]
    fn test_dual_zero_turn_dashes_use_colour_sets() {
        let dash = |start: Location| {
            MotionData::new(
                MotionType::Dash,
                RotationDirection::NoRotation,
                start,
                start.opposite(),
                Turns::ZERO,
                Orientation::In,
            )
        };
        let mut t = PlacementTables::default();
        t.defaults.insert(
            GridMode::Diamond,
            MotionType::Dash,
            DefaultPlacements::parse_cell(r#"{ "dash": { "0": [5, 0] } }"#).unwrap(),
        );
        let p = PictographData::new(
            GridMode::Diamond,
            Letter::new("Φ-"),
            LetterType::Type5,
            dash(Location::N),
            dash(Location::S),
        );
        let placer = placer(t);
        let blue = placer.trace(&p.blue, &p);
        let red = placer.trace(&p.red, &p);
        assert_eq!(blue.location, Location::E);
        assert_eq!(red.location, Location::W);
        // E is quadrant 1 on the hand ring, W is quadrant 3
        assert_eq!(blue.quadrant.get(), 1);
        assert_eq!(red.quadrant.get(), 3);
        assert_eq!(blue.adjustment, Adjustment::new(0.0, 5.0));
        assert_eq!(red.adjustment, Adjustment::new(0.0, 5.0));
        assert_eq!(blue.placed.rotation_deg, 0.0);
        assert!(!red.placed.mirrored);
    }
}

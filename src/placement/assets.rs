//! Placement tables compiled into the crate

use super::types::GridMode;

macro_rules! placement_files {
    ($grid:literal: $($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../../assets/placements/", $grid, "/", $name)))),*]
    };
}

const DIAMOND: &[(&str, &str)] = placement_files!("diamond":
    "default_diamond_pro_placements.json",
    "default_diamond_anti_placements.json",
    "default_diamond_float_placements.json",
    "default_diamond_dash_placements.json",
    "default_diamond_static_placements.json",
    "special_diamond_placements.json",
);

const BOX: &[(&str, &str)] = placement_files!("box":
    "default_box_pro_placements.json",
    "default_box_anti_placements.json",
    "default_box_float_placements.json",
    "default_box_dash_placements.json",
    "default_box_static_placements.json",
    "special_box_placements.json",
);

/// Bundled content of a table file
pub fn bundled(grid_mode: GridMode, file_name: &str) -> Option<&'static str> {
    let files = match grid_mode {
        GridMode::Diamond => DIAMOND,
        GridMode::Box => BOX,
    };
    files
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, content)| *content)
}

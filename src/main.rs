//! Pictograph Placement CLI
//!
//! Usage:
//!   pictograph-placement [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>    Placement configuration (TOML format)
//!   -d, --data-dir <DIR>   Read placement JSON from this directory
//!   -t, --trace            Print intermediate placement values to stderr
//!   -h, --help             Print help
//!
//! Reads a pictograph description (TOML) from FILE or stdin and prints one
//! line per arrow.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use pictograph_placement::{ArrowPlacer, Color, PictographFile, PlacedMotion, PlacementConfig};

#[derive(Parser)]
#[command(name = "pictograph-placement")]
#[command(about = "Place the arrow glyphs of a pictograph")]
struct Cli {
    /// Pictograph file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Placement configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with placement JSON files, overriding the config
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Print intermediate placement values to stderr
    #[arg(short, long)]
    trace: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match PlacementConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => PlacementConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let file = match &cli.input {
        Some(path) => PictographFile::from_file(path),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            PictographFile::from_str(&buffer)
        }
    };
    let pictograph = match file {
        Ok(file) => file.into_pictograph(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let placer = ArrowPlacer::new(config);
    let placed = placer.place_pictograph(&pictograph);
    for color in [Color::Blue, Color::Red] {
        if cli.trace {
            eprintln!("{color}: {:#?}", placer.trace(pictograph.arrow(color), &pictograph));
        }
        println!("{}", format_line(color, placed.get(color)));
    }
}

fn format_line(color: Color, placed: &PlacedMotion) -> String {
    let arrow = &placed.arrow;
    format!(
        "{:<4} {:<2} x={:.2} y={:.2} rotation={} mirrored={} prop={} ({})",
        color.as_str(),
        arrow.location.as_str(),
        arrow.x,
        arrow.y,
        arrow.rotation_deg,
        arrow.mirrored,
        placed.prop_rotation_deg,
        placed.end_orientation,
    )
}

use std::fs;

use clap::{Parser, Subcommand};
use log::{error, info};
use orrery_layout::radial::{
    DEFAULT_CENTER_OFFSET, DEFAULT_DISTANCE_RANGE, DEFAULT_SIZE_RANGE, RadialLayout,
};
use orrery_results::{DetailedResultsTracker, InteractiveRecord, ResultOption};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use serde_json::json;

/// Orrery CLI for computing radial result-marker layouts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one radial layout and print the placements as JSON
    Layout {
        /// Number of markers to place
        items: usize,

        /// Minimum marker diameter
        #[arg(long, default_value_t = DEFAULT_SIZE_RANGE.0)]
        size_min: f32,

        /// Maximum marker diameter
        #[arg(long, default_value_t = DEFAULT_SIZE_RANGE.1)]
        size_max: f32,

        /// Minimum distance from the center
        #[arg(long, default_value_t = DEFAULT_DISTANCE_RANGE.0)]
        distance_min: f32,

        /// Maximum distance from the center
        #[arg(long, default_value_t = DEFAULT_DISTANCE_RANGE.1)]
        distance_max: f32,

        /// Center of the circular region
        #[arg(long, default_value_t = DEFAULT_CENTER_OFFSET)]
        center: f32,

        /// Seed for reproducible output (defaults to the process rng)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Track results from a JSON file and print placements and the winner
    Results {
        /// Path to a JSON file with configured options and observed records
        file_path: String,

        /// Seed for reproducible placements (defaults to the process rng)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ResultsInput {
    options: Vec<ResultOption>,
    records: Vec<InteractiveRecord>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Layout {
            items,
            size_min,
            size_max,
            distance_min,
            distance_max,
            center,
            seed,
            compact,
        } => run_layout(
            items,
            (size_min, size_max),
            (distance_min, distance_max),
            center,
            seed,
            compact,
        ),
        Commands::Results { file_path, seed } => run_results(&file_path, seed),
    };

    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run_layout(
    items: usize,
    size_range: (f32, f32),
    distance_range: (f32, f32),
    center: f32,
    seed: Option<u64>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = RadialLayout::try_new(items)?
        .size_range(size_range)?
        .distance_range(distance_range)?
        .center_offset(center);

    let placements = match seed {
        Some(seed) => layout.compute_with(&mut StdRng::seed_from_u64(seed)),
        None => layout.compute(),
    };
    info!("Placed {} markers", placements.len());

    let output = if compact {
        serde_json::to_string(&placements)?
    } else {
        serde_json::to_string_pretty(&placements)?
    };
    println!("{}", output);
    Ok(())
}

fn run_results(file_path: &str, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(file_path)?;
    let input: ResultsInput = serde_json::from_str(&raw)?;

    let mut tracker = DetailedResultsTracker::try_new(input.options)?;
    let relaid = match seed {
        Some(seed) => tracker.update_with(&input.records, &mut StdRng::seed_from_u64(seed)),
        None => tracker.update(&input.records),
    }?;
    info!(
        "Tracking {} interactive components (relayout: {})",
        tracker.len(),
        relaid
    );

    let placements: Vec<serde_json::Value> = tracker
        .placements()
        .map(|(id, placement)| {
            json!({
                "interactive-id": id,
                "size": placement.size,
                "top": placement.top,
                "left": placement.left,
            })
        })
        .collect();

    let output = json!({
        "strategy": tracker.strategy(),
        "placements": placements,
        "winning-option": tracker.winning_option(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

//! tripmatch CLI - Debug tool for trip detection
//!
//! Usage:
//!   tripmatch-cli detect <records.json> [--config <file>] [--output <file>]
//!   tripmatch-cli resolve <lat> <lon> [--config <file>]
//!
//! This tool runs the trip detection pipeline over a JSON file of photo
//! records and shows how the stream was partitioned and named, helping to
//! tune gap thresholds and gazetteer entries. It performs no filing.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tripmatch::{
    Coordinate, DetectConfig, LocationGazetteer, LocationReference, LocationResolver, PhotoRecord,
    TripDetectionEngine,
};

#[derive(Parser)]
#[command(name = "tripmatch-cli")]
#[command(about = "Debug tool for photo trip detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a photo record file into named trips
    Detect {
        /// JSON file with an array of photo records
        records: PathBuf,

        /// Configuration file (trip_detection block + locations array)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the resulting trips as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Resolve a single coordinate against the gazetteer
    Resolve {
        /// Latitude in decimal degrees
        latitude: f64,

        /// Longitude in decimal degrees
        longitude: f64,

        /// Configuration file (for a custom locations array)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// On-disk configuration: the sync tool's `trip_detection` block plus an
/// optional gazetteer table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    trip_detection: DetectConfig,
    locations: Vec<LocationReference>,
}

/// One record as it arrives from EXIF extraction: latitude and longitude
/// are separate optional fields.
#[derive(Debug, Deserialize)]
struct RecordInput {
    id: String,
    taken_at: NaiveDateTime,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Detect {
            records,
            config,
            output,
            pretty,
        } => run_detect(&records, config.as_deref(), output.as_deref(), pretty),
        Commands::Resolve {
            latitude,
            longitude,
            config,
        } => run_resolve(latitude, longitude, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<FileConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(FileConfig::default()),
    }
}

fn gazetteer_from(config: &mut FileConfig) -> LocationGazetteer {
    if config.locations.is_empty() {
        LocationGazetteer::builtin()
    } else {
        LocationGazetteer::new(std::mem::take(&mut config.locations))
    }
}

fn load_records(path: &Path) -> Result<Vec<PhotoRecord>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let inputs: Vec<RecordInput> = serde_json::from_str(&text)?;

    let mut records = Vec::with_capacity(inputs.len());
    for input in inputs {
        records.push(PhotoRecord::from_parts(
            input.id,
            input.taken_at,
            input.latitude,
            input.longitude,
        )?);
    }
    Ok(records)
}

fn run_detect(
    records_path: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), Box<dyn Error>> {
    let mut file_config = load_config(config_path)?;
    let gazetteer = gazetteer_from(&mut file_config);
    let engine = TripDetectionEngine::new(file_config.trip_detection, gazetteer)?;

    let records = load_records(records_path)?;
    println!(
        "Loaded {} records from {}",
        records.len(),
        records_path.display()
    );

    let trips = engine.run(records)?;

    println!("\n{}", "=".repeat(60));
    println!("Detected {} trips", trips.len());
    println!("{}", "=".repeat(60));

    for (i, trip) in trips.iter().enumerate() {
        println!("\nTrip {}: {} ({} photos)", i + 1, trip.name, trip.len());
        if let Some(location) = &trip.location_name {
            println!("  Location: {location}");
        }
        println!(
            "  Span: {} day(s), GPS photos: {}",
            trip.days_span(),
            trip.gps_count
        );
        println!("  Closed: {}", trip.close_reason);
    }

    if let Some(output) = output {
        let json = if pretty {
            serde_json::to_string_pretty(&trips)?
        } else {
            serde_json::to_string(&trips)?
        };
        fs::write(output, json)?;
        println!("\nWrote {} trips to {}", trips.len(), output.display());
    }

    Ok(())
}

fn run_resolve(
    latitude: f64,
    longitude: f64,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut file_config = load_config(config_path)?;
    let gazetteer = gazetteer_from(&mut file_config);

    let coord = Coordinate::new(latitude, longitude);
    if !coord.is_valid() {
        return Err(format!("invalid coordinate ({latitude}, {longitude})").into());
    }

    match gazetteer.resolve(&coord) {
        Some(name) => println!("({latitude}, {longitude}) -> {name}"),
        None => println!(
            "({latitude}, {longitude}) -> no match among {} references",
            gazetteer.len()
        ),
    }

    Ok(())
}

//! One-shot location analysis from the command line.
//!
//! Fetches zone and record snapshots (from the configured store or from
//! explicit JSON files), analyzes a single point and prints the result as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zonewatch::analysis::{analyze_entities, AnalysisOptions};
use zonewatch::config::Config;
use zonewatch::models::Coordinate;
use zonewatch::store::{FileStore, SnapshotStore};

#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(about = "Resolve the containing zone and nearby records for a point")]
struct Args {
    /// Latitude of the incident point
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the incident point
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// TOML config file providing the store and analysis defaults
    #[arg(short, long, conflicts_with_all = ["zones", "records"])]
    config: Option<PathBuf>,

    /// Zone snapshot (JSON array)
    #[arg(long, requires = "records")]
    zones: Option<PathBuf>,

    /// Record snapshot (JSON array)
    #[arg(long, requires = "zones")]
    records: Option<PathBuf>,

    /// Search radius in meters
    #[arg(long)]
    radius: Option<f64>,

    /// Maximum number of nearby records
    #[arg(long)]
    size: Option<usize>,

    /// Dotted path of the location field on records
    #[arg(long)]
    location_field: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

/// Reject a bad point before any snapshot is fetched
fn query_point(args: &Args) -> Result<Coordinate> {
    let point = Coordinate::new(args.lat, args.lon);
    if !point.is_valid() {
        anyhow::bail!("Point ({}, {}) is not a valid coordinate", args.lat, args.lon);
    }
    Ok(point)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let point = query_point(&args)?;

    let (store, mut options) = match (&args.config, &args.zones, &args.records) {
        (Some(path), _, _) => {
            let config = Config::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            let store =
                SnapshotStore::from_config(&config.store).context("Failed to set up store")?;
            (store, config.analysis)
        }
        (None, Some(zones), Some(records)) => (
            SnapshotStore::File(FileStore::new(zones, records)),
            AnalysisOptions::default(),
        ),
        _ => anyhow::bail!("Either --config or both --zones and --records are required"),
    };

    if let Some(radius) = args.radius {
        options.radius_meters = radius;
    }
    if let Some(size) = args.size {
        options.max_results = size;
    }
    if let Some(field) = args.location_field {
        options.location_field = field;
    }

    info!("Fetching snapshots from {}", store.describe());
    let (zones, entities) = store
        .fetch_all()
        .await
        .context("Failed to fetch zone/record snapshots")?;

    let analysis = analyze_entities(&point, zones, &entities, &options);

    let output = if args.compact {
        serde_json::to_string(&analysis)?
    } else {
        serde_json::to_string_pretty(&analysis)?
    };
    println!("{}", output);

    Ok(())
}

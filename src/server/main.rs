//! Analysis server for incident locations.
//!
//! Provides an HTTP API that resolves the containing zone and nearby records
//! for a point, either against the configured store or an inline snapshot.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zonewatch::config::Config;
use zonewatch::store::SnapshotStore;

mod handlers;
use handlers::{router, AppState};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Zone and proximity analysis server")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "zonewatch.toml")]
    config: String,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Zonewatch Analysis Server");

    let config = Config::load_from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;
    let store = SnapshotStore::from_config(&config.store).context("Failed to set up store")?;
    info!("Snapshots come from {}", store.describe());

    let listen = args.listen.unwrap_or_else(|| config.server.listen.clone());

    let state = Arc::new(AppState {
        store,
        options: config.analysis,
    });

    let app = router(state);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

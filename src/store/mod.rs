//! Snapshot sources for zones and located records.
//!
//! Nothing is cached: every call goes back to the source, so each analysis
//! sees the current state of the backend.

mod file;
mod http;

pub use file::FileStore;
pub use http::HttpStore;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::{EntityRecord, Zone};

/// Convert snapshot items one by one, dropping the ones that do not parse.
pub(crate) fn parse_items<T: DeserializeOwned>(items: Vec<Value>, origin: &str) -> Vec<T> {
    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Skipping malformed entity from {}: {}", origin, e);
                None
            }
        })
        .collect();

    let skipped = total - parsed.len();
    if skipped > 0 {
        warn!(
            "Skipped {} of {} malformed entities from {}",
            skipped, total, origin
        );
    }
    parsed
}

/// A configured zone/record source
#[derive(Clone)]
pub enum SnapshotStore {
    File(FileStore),
    Http(HttpStore),
}

impl SnapshotStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        match config {
            StoreConfig::File {
                zones_path,
                records_path,
            } => Ok(SnapshotStore::File(FileStore::new(zones_path, records_path))),
            StoreConfig::Http {
                base_url,
                api_key,
                zone_entity,
                record_entity,
            } => Ok(SnapshotStore::Http(HttpStore::new(
                base_url,
                api_key.clone(),
                zone_entity,
                record_entity,
            )?)),
        }
    }

    pub async fn fetch_zones(&self) -> Result<Vec<Zone>, StoreError> {
        match self {
            SnapshotStore::File(store) => store.fetch_zones().await,
            SnapshotStore::Http(store) => store.fetch_zones().await,
        }
    }

    pub async fn fetch_records(&self) -> Result<Vec<EntityRecord>, StoreError> {
        match self {
            SnapshotStore::File(store) => store.fetch_records().await,
            SnapshotStore::Http(store) => store.fetch_records().await,
        }
    }

    /// Fetch both snapshots concurrently
    pub async fn fetch_all(&self) -> Result<(Vec<Zone>, Vec<EntityRecord>), StoreError> {
        tokio::try_join!(self.fetch_zones(), self.fetch_records())
    }

    pub fn describe(&self) -> String {
        match self {
            SnapshotStore::File(store) => format!(
                "files {} / {}",
                store.zones_path().display(),
                store.records_path().display()
            ),
            SnapshotStore::Http(store) => format!("entity API at {}", store.base_url()),
        }
    }
}

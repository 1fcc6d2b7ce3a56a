//! JSON snapshot files on disk.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::parse_items;
use crate::error::StoreError;
use crate::models::{EntityRecord, Zone};

#[derive(Debug, Clone)]
pub struct FileStore {
    zones_path: PathBuf,
    records_path: PathBuf,
}

impl FileStore {
    pub fn new(zones_path: impl Into<PathBuf>, records_path: impl Into<PathBuf>) -> Self {
        Self {
            zones_path: zones_path.into(),
            records_path: records_path.into(),
        }
    }

    pub fn zones_path(&self) -> &Path {
        &self.zones_path
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    pub async fn fetch_zones(&self) -> Result<Vec<Zone>, StoreError> {
        read_json_array(&self.zones_path).await
    }

    pub async fn fetch_records(&self) -> Result<Vec<EntityRecord>, StoreError> {
        read_json_array(&self.records_path).await
    }
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let origin = path.display().to_string();
    let raw: Vec<Value> = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        origin: origin.clone(),
        source,
    })?;
    let items: Vec<T> = parse_items(raw, &origin);

    debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

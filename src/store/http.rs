//! Entity API client for the managed backend.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use super::parse_items;
use crate::error::StoreError;
use crate::models::{EntityRecord, Zone};

/// Fetches entity lists from `{base_url}/entities/{entity}`
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    zone_entity: String,
    record_entity: String,
}

impl HttpStore {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        zone_entity: &str,
        record_entity: &str,
    ) -> Result<Self, StoreError> {
        // Without a trailing slash Url::join would replace the last segment
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let client = Client::builder()
            .user_agent(concat!("zonewatch/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            api_key,
            zone_entity: zone_entity.to_string(),
            record_entity: record_entity.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_zones(&self) -> Result<Vec<Zone>, StoreError> {
        self.fetch_entities(&self.zone_entity).await
    }

    pub async fn fetch_records(&self) -> Result<Vec<EntityRecord>, StoreError> {
        self.fetch_entities(&self.record_entity).await
    }

    /// List every entity of one type
    pub async fn fetch_entities<T: DeserializeOwned>(
        &self,
        entity: &str,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.base_url.join(&format!("entities/{}", entity))?;

        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("Entity API returned {} for {}", status, url);
            return Err(StoreError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let raw: Vec<Value> = serde_json::from_slice(&body).map_err(|source| StoreError::Parse {
            origin: url.to_string(),
            source,
        })?;
        let items: Vec<T> = parse_items(raw, url.as_str());

        debug!("Fetched {} {} entities", items.len(), entity);
        Ok(items)
    }
}

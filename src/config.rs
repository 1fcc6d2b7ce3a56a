//! TOML configuration shared by the server and CLI.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::AnalysisOptions;
use crate::error::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub analysis: AnalysisOptions,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

/// Where zone and record snapshots come from
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    File {
        zones_path: PathBuf,
        records_path: PathBuf,
    },
    Http {
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_zone_entity")]
        zone_entity: String,
        record_entity: String,
    },
}

fn default_zone_entity() -> String {
    "Zone".to_string()
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.analysis.radius_meters;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "analysis.radius_meters must be a non-negative number, got {}",
                radius
            )));
        }
        if self.analysis.location_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "analysis.location_field must not be empty".to_string(),
            ));
        }
        if let StoreConfig::Http { base_url, .. } = &self.store {
            if base_url.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "store.base_url must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

//! Library error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::FieldViolation;

/// Failure fetching a zone or record snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid entity API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("entity API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("entity API returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Failure loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A record that does not satisfy its entity schema
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{entity} record has {} invalid field(s)", .violations.len())]
    Invalid {
        entity: String,
        violations: Vec<FieldViolation>,
    },
}

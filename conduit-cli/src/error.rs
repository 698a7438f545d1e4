//! Host error type.

use conduit_core::{ConduitError, ConfigError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(#[from] ConfigError),

    #[error(transparent)]
    Conduit(#[from] ConduitError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),
}

pub type CliResult<T> = Result<T, CliError>;

//! Error handling for The Wraith

use thiserror::Error;

/// Main error type for The Wraith
#[derive(Error, Debug)]
pub enum WraithError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Invalid simulation parameters: {0}")]
    InvalidSimulation(String),

    #[error("Bot engine is not available: the owning engine was dropped or shut down")]
    EngineUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for The Wraith
pub type Result<T> = std::result::Result<T, WraithError>;

impl From<anyhow::Error> for WraithError {
    fn from(err: anyhow::Error) -> Self {
        WraithError::Internal(err.to_string())
    }
}

impl From<toml::de::Error> for WraithError {
    fn from(err: toml::de::Error) -> Self {
        WraithError::Config(config::ConfigError::Message(err.to_string()))
    }
}

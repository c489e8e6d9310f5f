//! Scrollbar error types

use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Props document is not valid JSON for the props schema
    #[error("Invalid scrollbar props JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Props document is not valid TOML for the props schema
    #[error("Invalid scrollbar props TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Error types for the ntxscout pipeline
//!
//! Library modules return `ScoutError`; app-edge code (config, CLI handlers)
//! uses anyhow with context and bridges back through `From<anyhow::Error>`.

use thiserror::Error;

/// Main error type for the scout pipeline
#[derive(Error, Debug)]
pub enum ScoutError {
    /// E-utilities returned a non-success status or an unusable body
    #[error("PubMed API error: {0}")]
    PubMedApi(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scan cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Generic errors with context
    #[error("Scout error: {0}")]
    Generic(String),
}

/// Result type alias for scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Convert anyhow errors to ScoutError
impl From<anyhow::Error> for ScoutError {
    fn from(err: anyhow::Error) -> Self {
        ScoutError::Generic(err.to_string())
    }
}

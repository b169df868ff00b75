//! Sentinelle error types

use thiserror::Error;

/// Sentinelle error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity service call failure
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Client-side input validation failure
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed or unexpected entity record
    #[error("Entity error: {0}")]
    Entity(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Sentinelle operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for xlog

use thiserror::Error;

/// Errors raised while building or configuring sinks.
///
/// Logging itself never fails from the caller's point of view; these only
/// come out of parsing and construction.
#[derive(Error, Debug)]
pub enum XlogError {
    /// Level name not recognised
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Opening a sink destination failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration document is inconsistent
    #[error("Config error: {0}")]
    Config(String),

    /// Configuration document is not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using XlogError
pub type XlogResult<T> = Result<T, XlogError>;

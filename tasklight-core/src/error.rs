//! Error types for tasklight-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tasklight-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Task document missing at the expected path
    #[error("task document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    /// Task document exists but could not be read
    #[error("task document unreadable: {}: {source}", path.display())]
    DocumentUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for tasklight-core
pub type Result<T> = std::result::Result<T, Error>;

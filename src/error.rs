//! Error types for mindlink

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`MindlinkError`]
pub type Result<T> = std::result::Result<T, MindlinkError>;

/// Main error type for mindlink
#[derive(Debug, Error)]
pub enum MindlinkError {
    /// No API key was passed and none could be resolved from settings
    #[error("OpenAI API key not provided")]
    MissingApiKey,

    /// Connectivity probe failed during login
    #[error("Connection error: {0}")]
    Connection(String),

    /// The completion call itself failed
    #[error("Failed to generate response: {0}")]
    Completion(String),

    /// API returned a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file parse error
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}

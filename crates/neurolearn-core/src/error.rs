//! Core error types for neurolearn-core.
//!
//! This module defines the error hierarchy using thiserror. Every persisted
//! read or write funnels its failure into [`StorageError`]; input problems
//! are reported as [`ValidationError`] before any state changes.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for neurolearn-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Learning assistant errors
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a key-value store adapter.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying medium could not be read or written.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A persisted value exists but cannot be decoded.
    #[error("Corrupt value under key '{key}': {message}")]
    Corrupt { key: String, message: String },
}

impl StorageError {
    pub fn corrupt(key: &str, message: impl Into<String>) -> Self {
        StorageError::Corrupt {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not determine where configuration lives
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A session cannot start or be reviewed without a topic
    #[error("Topic must not be empty")]
    EmptyTopic,

    /// Concentration rating outside 1..=5
    #[error("Concentration must be between 1 and 5, got {0}")]
    ConcentrationOutOfRange(u8),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Learning assistant (text-generation API) errors.
///
/// These never touch XP, streak or history state.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// No API key has been configured
    #[error("No API key configured for the learning assistant")]
    MissingApiKey,

    /// Endpoint URL could not be parsed
    #[error("Invalid assistant endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Assistant API error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    /// OS keyring failure
    #[error("Keyring error: {0}")]
    Keyring(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

impl From<keyring::Error> for AssistantError {
    fn from(err: keyring::Error) -> Self {
        AssistantError::Keyring(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

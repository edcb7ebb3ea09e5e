//! Unified error types for QuizPilot Core.

use serde::Serialize;
use thiserror::Error;

use quizpilot_types::ConfigError;

/// Infrastructure error type (storage, config, HTTP client setup).
///
/// Answer pipeline failures use [`quizpilot_types::AskError`] instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Network request failed (HTTP client).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential storage failed.
    #[error("Credential store error: {0}")]
    Credential(String),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// Result type alias for QuizPilot infrastructure operations.
pub type AppResult<T> = Result<T, AppError>;

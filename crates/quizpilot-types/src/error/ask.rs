//! Errors surfaced by the answer pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RotationError;

/// Errors that can occur while asking the model for an answer.
///
/// `RateLimited` and `ServerError` are resolved inside the retry loop and only
/// escape it through the transport layer; callers see `ApiError` once the
/// retry budget is spent.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AskError {
    /// The caller stopped the request while it was waiting
    #[error("Request cancelled by user during {stage}")]
    Cancelled { stage: String },

    /// Provider answered 429
    #[error("Rate limited on {model}{}", retry_after_secs.map(|s| format!(", retry after {}s", s)).unwrap_or_default())]
    RateLimited { model: String, retry_after_secs: Option<u64> },

    /// Provider answered 500/503
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Non-retriable provider error
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Completion text did not contain a usable answer object
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Completion ended with an abnormal finish reason
    #[error("Stopped: {reason} - {payload}")]
    Stopped { reason: String, payload: String },

    /// Transport failure before a response arrived
    #[error("Network error: {message}")]
    Network { message: String },

    /// Credential rotation could not produce a new key
    #[error(transparent)]
    Rotation(#[from] RotationError),

    /// No credential configured
    #[error("API key is required")]
    MissingCredential,
}

impl AskError {
    /// Stable machine-readable name for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cancelled { .. } => "cancelled",
            Self::RateLimited { .. } => "rate_limited",
            Self::ServerError { .. } => "server_error",
            Self::ApiError { .. } => "api_error",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Stopped { .. } => "stopped",
            Self::Network { .. } => "network",
            Self::Rotation(RotationError::Timeout { .. }) => "rotation_timeout",
            Self::Rotation(_) => "rotation_failed",
            Self::MissingCredential => "missing_credential",
        }
    }

    /// Check if the error is a transport-class failure eligible for backoff.
    pub fn is_network_class(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if the error came from the caller aborting.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

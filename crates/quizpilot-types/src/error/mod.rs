//! Typed error definitions for QuizPilot.
//!
//! This module provides a structured error hierarchy with specific error types
//! for different domains. All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants

mod ask;
mod config;
mod rotation;

pub use ask::AskError;
pub use config::ConfigError;
pub use rotation::RotationError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a failure of the answer pipeline
    #[error("Ask error: {0}")]
    Ask(#[from] AskError),

    /// Wraps a credential rotation failure
    #[error("Rotation error: {0}")]
    Rotation(#[from] RotationError),

    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = TypedError::Ask(AskError::ApiError {
            status: 403,
            message: "Permission denied".to_string(),
        });

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Ask"));
        assert!(json.contains("Permission denied"));

        let deserialized: TypedError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_rotation_error_wraps_into_ask() {
        let err: AskError = RotationError::Failed { message: "no button".to_string() }.into();
        assert_eq!(err.kind(), "rotation_failed");
        assert!(err.to_string().contains("no button"));
    }
}

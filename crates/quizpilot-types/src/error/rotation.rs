//! Credential rotation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while obtaining a fresh credential.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RotationError {
    /// Poll budget exhausted before the agent answered
    #[error("Timeout waiting for {stage} after {attempts} attempts")]
    Timeout {
        /// Rotation stage that timed out (e.g. "project cleanup")
        stage: String,
        /// Number of polls performed
        attempts: u32,
    },

    /// The page agent reported a failure
    #[error("Key rotation failed: {message}")]
    Failed {
        /// Error reported by the agent
        message: String,
    },

    /// The automation surface could not open or drive the console page
    #[error("Automation surface error: {message}")]
    Surface {
        /// Description of the surface failure
        message: String,
    },

    /// Rotation is turned off in configuration
    #[error("Credential rotation is disabled")]
    Disabled,
}

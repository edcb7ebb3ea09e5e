//! Progress notices emitted while an answer is being produced.

use serde::{Deserialize, Serialize};

/// Severity of a status update, mirrored by the console log in the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    #[default]
    Info,
    Action,
    Warning,
    Error,
    Success,
}

/// One progress notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub message: String,
    pub level: StatusLevel,
}

impl StatusUpdate {
    pub fn new(level: StatusLevel, message: impl Into<String>) -> Self {
        Self { message: message.into(), level }
    }

    pub fn action(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Action, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, message)
    }
}

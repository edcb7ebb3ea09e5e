//! Credential rotation settings.

use serde::{Deserialize, Serialize};

/// How the daemon obtains a replacement credential.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// Wait for a new key to be supplied through the settings surface
    #[default]
    Manual,
    /// Fail immediately when a rotation would be needed
    Disabled,
}

/// Console URLs and polling budget for credential rotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RotationConfig {
    pub mode: RotationMode,
    /// Page listing cloud projects tied to old keys
    pub projects_url: String,
    /// Page where keys are deleted and created
    pub keys_url: String,
    pub poll_interval_ms: u64,
    /// Polls per stage before giving up
    pub max_polls: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            mode: RotationMode::Manual,
            projects_url: "https://aistudio.google.com/projects".to_string(),
            keys_url: "https://aistudio.google.com/api-keys".to_string(),
            poll_interval_ms: 2000,
            max_polls: 60,
        }
    }
}

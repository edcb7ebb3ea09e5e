//! Application-level configuration.

use serde::{Deserialize, Serialize};

use super::gemini::GeminiConfig;
use super::retry::RetryPolicy;
use super::rotation::RotationConfig;
use crate::error::ConfigError;

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Provider endpoint and generation settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Retry, backoff, and model switching policy
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Outbound request pacing
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Credential rotation
    #[serde(default)]
    pub rotation: RotationConfig,
    /// Daemon HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values the answer engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.models.is_empty() {
            return Err(ConfigError::invalid("gemini.models", "model roster must not be empty"));
        }
        if self.gemini.models.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::invalid("gemini.models", "model names must not be blank"));
        }
        if self.gemini.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("gemini.base_url", "must not be empty"));
        }
        if self.retry.exhaustion_factor == 0 {
            return Err(ConfigError::invalid("retry.exhaustion_factor", "must be at least 1"));
        }
        if self.rotation.max_polls == 0 {
            return Err(ConfigError::invalid("rotation.max_polls", "must be at least 1"));
        }
        if self.rotation.poll_interval_ms == 0 {
            return Err(ConfigError::invalid("rotation.poll_interval_ms", "must be at least 1"));
        }
        Ok(())
    }
}

/// Minimum spacing between outbound requests.
///
/// Defaults to zero: pacing is reactive and driven by server-reported waits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PacingConfig {
    #[serde(default)]
    pub min_interval_ms: u64,
}

/// HTTP listener settings for the daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8046 }
    }
}

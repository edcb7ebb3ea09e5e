//! Retry and model-switching policy.

use serde::{Deserialize, Serialize};

/// Tunables for the retry state machine.
///
/// The exhaustion threshold is `exhaustion_factor × roster length` model
/// switches; each model gets one grace wait before it is skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetryPolicy {
    /// Ceiling for server-error and network-class retries
    pub max_retries: u32,
    /// Base for exponential backoff
    pub retry_delay_ms: u64,
    /// Grace wait on a 429 without a server hint
    pub default_rate_limit_wait_ms: u64,
    /// Added to a server-suggested wait
    pub rate_limit_buffer_ms: u64,
    /// Debounce after switching models
    pub model_switch_delay_ms: u64,
    /// Multiplier on roster length before rotating credentials
    pub exhaustion_factor: u32,
    /// Rotations one question may trigger before the last error is surfaced
    pub max_rotations: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay_ms: 1000,
            default_rate_limit_wait_ms: 2000,
            rate_limit_buffer_ms: 1000,
            model_switch_delay_ms: 1000,
            exhaustion_factor: 2,
            max_rotations: 3,
        }
    }
}

//! Gemini provider settings.

use serde::{Deserialize, Serialize};

/// Public Generative Language API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Ordered model roster tried under sustained rate limiting.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-3-pro-preview",
    "gemini-2.5-pro",
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
];

/// Provider endpoint and generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Model roster, tried in order
    pub models: Vec<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| (*m).to_string()).collect(),
            temperature: 0.7,
            max_output_tokens: 8192,
            request_timeout_secs: 120,
        }
    }
}

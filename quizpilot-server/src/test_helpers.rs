//! Test helpers for quizpilot-server unit tests.

use tempfile::TempDir;

use quizpilot_types::AppConfig;

use crate::state::AppState;

/// Create a minimal `AppState` for testing.
///
/// Returns `(AppState, TempDir)`; keep `TempDir` alive for the test duration.
pub fn test_app_state() -> (AppState, TempDir) {
    test_app_state_with(AppConfig::default())
}

/// Like [`test_app_state`], with the engine pointed at `base_url`.
pub fn test_app_state_at(base_url: &str) -> (AppState, TempDir) {
    let mut config = AppConfig::default();
    config.gemini.base_url = base_url.to_string();
    config.retry.retry_delay_ms = 1;
    config.retry.default_rate_limit_wait_ms = 5;
    config.retry.model_switch_delay_ms = 1;
    test_app_state_with(config)
}

pub fn test_app_state_with(config: AppConfig) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let state = AppState::new(temp_dir.path(), config).expect("failed to create test AppState");
    (state, temp_dir)
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use quizpilot_core::modules::config::load_config_from;

use super::config::{get_config, save_config};
use crate::test_helpers::test_app_state;

#[tokio::test]
async fn test_save_config_persists_and_updates_state() {
    let (state, tmp) = test_app_state();

    let Json(mut config) = get_config(State(state.clone())).await;
    config.retry.max_retries = 3;
    config.pacing.min_interval_ms = 1500;

    let Json(ok) = save_config(State(state.clone()), Json(config.clone())).await.unwrap();
    assert!(ok);

    let Json(current) = get_config(State(state)).await;
    assert_eq!(current, config);
    assert_eq!(load_config_from(tmp.path()).unwrap(), config);
}

#[tokio::test]
async fn test_invalid_config_rejected_and_not_written() {
    let (state, tmp) = test_app_state();

    let Json(mut config) = get_config(State(state.clone())).await;
    config.gemini.models.clear();

    let err = save_config(State(state), Json(config)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.body.error, "invalid_config");
    assert!(!tmp.path().join("config.json").exists());
}

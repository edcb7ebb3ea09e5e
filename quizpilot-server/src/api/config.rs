//! Configuration handlers

use axum::{extract::State, http::StatusCode, response::Json};

use quizpilot_core::modules::config as core_config;
use quizpilot_types::AppConfig;

use super::ApiError;
use crate::state::AppState;

pub async fn get_config(State(state): State<AppState>) -> Json<AppConfig> {
    Json(state.config())
}

/// Validate and persist. Engine settings apply on the next start.
pub async fn save_config(
    State(state): State<AppState>,
    Json(payload): Json<AppConfig>,
) -> Result<Json<bool>, ApiError> {
    if let Err(e) = payload.validate() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "invalid_config", e.to_string()));
    }

    let data_dir = state.data_dir().to_path_buf();
    let to_save = payload.clone();
    match tokio::task::spawn_blocking(move || core_config::save_config_to(&data_dir, &to_save)).await
    {
        Ok(Ok(())) => {
            state.replace_config(payload);
            tracing::info!("Configuration saved; engine settings take effect on restart");
            Ok(Json(true))
        },
        Ok(Err(e)) => Err(ApiError::internal(e.to_string())),
        Err(e) => Err(ApiError::internal(format!("spawn_blocking panicked: {e}"))),
    }
}

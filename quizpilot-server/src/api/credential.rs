//! Credential handlers

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use quizpilot_core::modules::credential::mask_credential;
use quizpilot_types::CredentialCheck;

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub masked: Option<String>,
    /// A rotation is blocked waiting for a new key
    pub rotation_pending: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct SaveCredentialResponse {
    pub saved: bool,
    /// The key also unblocked a waiting rotation
    pub resumed_rotation: bool,
}

pub async fn get_credential(
    State(state): State<AppState>,
) -> Result<Json<CredentialStatus>, ApiError> {
    let stored = state.store().get().await.map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(CredentialStatus {
        configured: stored.is_some(),
        masked: stored.as_deref().map(mask_credential),
        rotation_pending: state
            .inner
            .manual_rotator
            .as_ref()
            .is_some_and(|rotator| rotator.is_pending()),
    }))
}

pub async fn save_credential(
    State(state): State<AppState>,
    Json(payload): Json<CredentialRequest>,
) -> Result<Json<SaveCredentialResponse>, ApiError> {
    let api_key = payload.api_key.trim();
    if api_key.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", "API key is required"));
    }

    // a waiting rotation persists the key itself once it resumes
    if state.supply_rotated_credential(api_key) {
        return Ok(Json(SaveCredentialResponse { saved: true, resumed_rotation: true }));
    }

    state.store().set(api_key).await.map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(SaveCredentialResponse { saved: true, resumed_rotation: false }))
}

pub async fn test_credential(
    State(state): State<AppState>,
    Json(payload): Json<CredentialRequest>,
) -> Json<CredentialCheck> {
    Json(state.processor().executor().validate_credential(&payload.api_key).await)
}

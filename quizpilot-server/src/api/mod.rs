//! API Routes
//!
//! REST endpoints used by the page script and the settings surface.

pub(crate) mod config;
pub(crate) mod credential;
pub(crate) mod question;

#[cfg(test)]
mod config_tests;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Questions
        .route("/question", post(question::ask_question))
        .route("/question/cancel", post(question::cancel_question))
        .route("/status/events", get(question::get_status_events))
        // Credential
        .route("/credential", get(credential::get_credential).put(credential::save_credential))
        .route("/credential/test", post(credential::test_credential))
        // Config
        .route("/config", get(config::get_config).put(config::save_config))
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self { status, body: ErrorResponse { error: error.to_string(), message: message.into() } }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

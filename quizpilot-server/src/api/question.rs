//! Question handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use quizpilot_core::{CancellationToken, ProcessError};
use quizpilot_types::{AnswerResult, AskError, QuestionRecord};

use super::ApiError;
use crate::state::AppState;
use crate::status_feed::StatusEvent;

/// Non-standard "client closed request" status.
const CLIENT_CLOSED_REQUEST: u16 = 499;

pub async fn ask_question(
    State(state): State<AppState>,
    Json(record): Json<QuestionRecord>,
) -> Result<Json<AnswerResult>, ApiError> {
    let cancel = CancellationToken::new();
    let result = state.processor().process(&record, state.events(), &cancel).await;

    match result {
        Ok(answer) => Ok(Json(answer)),
        Err(ProcessError::Busy) => Err(ApiError::new(
            StatusCode::CONFLICT,
            "busy",
            "A question is already being processed",
        )),
        Err(ProcessError::Storage(message)) => Err(ApiError::internal(message)),
        Err(ProcessError::Failed { error, alert }) => {
            Err(ApiError::new(status_for(&error), error.kind(), alert))
        },
    }
}

fn status_for(error: &AskError) -> StatusCode {
    match error {
        AskError::MissingCredential => StatusCode::PRECONDITION_FAILED,
        AskError::Cancelled { .. } => {
            StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::BAD_REQUEST)
        },
        AskError::ApiError { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

pub async fn cancel_question(State(state): State<AppState>) -> Json<CancelResponse> {
    Json(CancelResponse { cancelled: state.processor().cancel_current() })
}

#[derive(Deserialize)]
pub struct EventsQuery {
    pub limit: Option<usize>,
    /// Only events with a larger id
    pub since: Option<u64>,
}

pub async fn get_status_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<StatusEvent>> {
    Json(state.events().recent(query.limit.unwrap_or(50), query.since))
}

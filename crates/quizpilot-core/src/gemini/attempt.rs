//! Classification of one `generateContent` reply.

use quizpilot_types::protocol::gemini::{FINISH_REASON_MAX_TOKENS, FINISH_REASON_STOP};
use quizpilot_types::protocol::GenerateContentResponse;
use quizpilot_types::AskError;

use super::retry::{extract_error_message, is_invalid_credential_message};
use super::upstream::UpstreamReply;

/// What a single attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Normal completion; carries the raw completion text
    Completed(String),
    /// 429
    RateLimited { message: String, retry_after_secs: Option<u64> },
    /// 500 / 503
    ServerError { status: u16, message: String },
    /// 400 naming the key as deleted or invalid
    InvalidCredential { message: String },
    /// Output cut off at `maxOutputTokens`
    Truncated { payload: String },
    /// Transport failure
    Network { message: String },
    /// Anything not worth retrying
    Failed(AskError),
}

impl AttemptOutcome {
    pub fn from_transport_error(error: AskError) -> Self {
        match error {
            AskError::Network { message } => Self::Network { message },
            other => Self::Failed(other),
        }
    }
}

/// Map an HTTP reply onto an [`AttemptOutcome`].
pub fn classify(reply: &UpstreamReply) -> AttemptOutcome {
    let status = reply.status;

    if (200..300).contains(&status) {
        return classify_success(&reply.body);
    }

    let provider_message = extract_error_message(&reply.body);
    match status {
        429 => AttemptOutcome::RateLimited {
            message: provider_message.unwrap_or_else(|| reply.body.clone()),
            retry_after_secs: reply.retry_after_secs,
        },
        500 | 503 => AttemptOutcome::ServerError {
            status,
            message: provider_message.unwrap_or_else(|| reply.body.clone()),
        },
        400 if provider_message.as_deref().is_some_and(is_invalid_credential_message) => {
            AttemptOutcome::InvalidCredential { message: provider_message.unwrap_or_default() }
        },
        _ => AttemptOutcome::Failed(AskError::ApiError {
            status,
            message: provider_message
                .unwrap_or_else(|| format!("API failed: {} - {}", status, reply.body)),
        }),
    }
}

fn classify_success(body: &str) -> AttemptOutcome {
    let response: GenerateContentResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            return AttemptOutcome::Failed(AskError::MalformedResponse {
                message: format!("Invalid response body ({}): {}", e, body),
            })
        },
    };

    let Some(candidate) = response.candidates.first() else {
        return AttemptOutcome::Failed(AskError::MalformedResponse {
            message: format!("No candidates - {}", body),
        });
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason == FINISH_REASON_MAX_TOKENS {
            return AttemptOutcome::Truncated { payload: body.to_string() };
        }
        if reason != FINISH_REASON_STOP {
            return AttemptOutcome::Failed(AskError::Stopped {
                reason: reason.to_string(),
                payload: body.to_string(),
            });
        }
    }

    match candidate.first_text() {
        None => AttemptOutcome::Failed(AskError::MalformedResponse {
            message: format!("No content - {}", body),
        }),
        Some("") => AttemptOutcome::Failed(AskError::MalformedResponse {
            message: format!("Empty response - {}", body),
        }),
        Some(text) => AttemptOutcome::Completed(text.to_string()),
    }
}

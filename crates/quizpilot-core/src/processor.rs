//! Single-flight question processing on top of [`RequestExecutor`].

use std::sync::Arc;

use parking_lot::Mutex;
use quizpilot_types::{AnswerResult, AskError, QuestionRecord, RotationError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::gemini::{RequestExecutor, StatusReporter};

const MISSING_CREDENTIAL_ALERT: &str =
    "Please configure your Gemini API key in the extension settings before using automation.";

#[derive(Debug, Error)]
pub enum ProcessError {
    /// Another question is still in flight
    #[error("A question is already being processed")]
    Busy,

    #[error("Credential storage error: {0}")]
    Storage(String),

    /// The engine gave up; `alert` is the text to show the user
    #[error("{alert}")]
    Failed { error: AskError, alert: String },
}

/// Runs at most one question at a time and remembers how to cancel it.
pub struct QuestionProcessor {
    executor: Arc<RequestExecutor>,
    current: Mutex<Option<CancellationToken>>,
}

/// Clears the in-flight slot when processing ends, however it ends.
struct InFlight<'a> {
    slot: &'a Mutex<Option<CancellationToken>>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

impl QuestionProcessor {
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor, current: Mutex::new(None) }
    }

    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }

    pub fn is_processing(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Cancel the in-flight question. Returns `false` when idle.
    pub fn cancel_current(&self) -> bool {
        match self.current.lock().as_ref() {
            Some(token) => {
                info!("Cancelling in-flight question");
                token.cancel();
                true
            },
            None => false,
        }
    }

    /// Answer `record` with the stored credential.
    pub async fn process(
        &self,
        record: &QuestionRecord,
        reporter: &dyn StatusReporter,
        cancel: &CancellationToken,
    ) -> Result<AnswerResult, ProcessError> {
        let token = {
            let mut slot = self.current.lock();
            if slot.is_some() {
                warn!("Already processing a question, rejecting");
                return Err(ProcessError::Busy);
            }
            let token = cancel.child_token();
            *slot = Some(token.clone());
            token
        };
        let _in_flight = InFlight { slot: &self.current };

        let credential = self
            .executor
            .store()
            .get()
            .await
            .map_err(|e| ProcessError::Storage(e.to_string()))?;
        let Some(credential) = credential else {
            warn!("No API key configured");
            return Err(ProcessError::Failed {
                error: AskError::MissingCredential,
                alert: MISSING_CREDENTIAL_ALERT.to_string(),
            });
        };

        match self.executor.ask_model(&credential, record, reporter, &token).await {
            Ok(result) => Ok(result),
            Err(error) => {
                let alert = alert_message(&error);
                warn!("Question failed: {}", error);
                Err(ProcessError::Failed { error, alert })
            },
        }
    }
}

/// User-facing alert for a failed question, with the technical detail appended.
pub fn alert_message(error: &AskError) -> String {
    if matches!(error, AskError::MissingCredential) {
        return MISSING_CREDENTIAL_ALERT.to_string();
    }
    let headline = match error {
        AskError::ApiError { status: 400 | 401 | 403, .. }
        | AskError::Rotation(RotationError::Disabled) => {
            "Invalid API key. Please check your API key in settings."
        },
        AskError::ApiError { status: 429, .. } | AskError::RateLimited { .. } => {
            "API rate limit exceeded. Please wait a moment and try again."
        },
        AskError::Network { .. } => "Network error. Please check your internet connection.",
        AskError::MalformedResponse { .. } => {
            "Failed to parse API response. The AI may have returned an invalid format."
        },
        AskError::Stopped { .. } => {
            "Content was blocked by safety filters. Try rephrasing the question."
        },
        AskError::Cancelled { .. } => "Request cancelled.",
        _ => "Failed to get response from Gemini AI.",
    };
    format!("{}\n\nError details: {}", headline, error)
}

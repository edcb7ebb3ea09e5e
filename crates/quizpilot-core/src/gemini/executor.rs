//! Drives one question through pacing, the provider call and the retry
//! state machine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use quizpilot_types::protocol::GenerateContentRequest;
use quizpilot_types::{
    AnswerResult, AppConfig, AskError, CredentialCheck, QuestionRecord, RetryPolicy,
    RotationError, StatusUpdate,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::attempt::{classify, AttemptOutcome};
use super::pacer::RatePacer;
use super::prompt::format_question_prompt;
use super::response_parser::parse_answer;
use super::retry::{announce_and_wait, check_cancelled};
use super::session::{ModelCursor, RetrySession};
use super::state_machine::{plan_next, NextStep, RotationCause};
use super::status::{trace_status, StatusReporter};
use super::upstream::GeminiClient;
use crate::error::AppResult;
use crate::modules::credential::{mask_credential, CredentialStore};
use crate::rotation::CredentialRotator;

pub struct RequestExecutor {
    client: GeminiClient,
    roster: Vec<String>,
    policy: RetryPolicy,
    temperature: f32,
    max_output_tokens: u32,
    pacer: RatePacer,
    cursor: ModelCursor,
    store: Arc<dyn CredentialStore>,
    rotator: Arc<dyn CredentialRotator>,
    /// Held for the whole rotation so concurrent callers rotate at most once
    rotation_gate: tokio::sync::Mutex<()>,
    /// Bumped after every successful rotation
    rotation_generation: AtomicU64,
}

impl RequestExecutor {
    pub fn new(
        client: GeminiClient,
        config: &AppConfig,
        store: Arc<dyn CredentialStore>,
        rotator: Arc<dyn CredentialRotator>,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            client,
            roster: config.gemini.models.clone(),
            policy: config.retry.clone(),
            temperature: config.gemini.temperature,
            max_output_tokens: config.gemini.max_output_tokens,
            pacer: RatePacer::new(Duration::from_millis(config.pacing.min_interval_ms)),
            cursor: ModelCursor::new(0),
            store,
            rotator,
            rotation_gate: tokio::sync::Mutex::new(()),
            rotation_generation: AtomicU64::new(0),
        })
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Model the next call will start on.
    pub fn current_model(&self) -> &str {
        self.roster.get(self.cursor.get(self.roster.len())).map(String::as_str).unwrap_or_default()
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Probe `credential` against the first model of the roster.
    pub async fn validate_credential(&self, credential: &str) -> CredentialCheck {
        let model = self.roster.first().map(String::as_str).unwrap_or_default();
        self.client.validate_credential(model, credential).await
    }

    /// Ask the model to answer `record`.
    ///
    /// Rate limits, server errors and dead keys are absorbed by waiting,
    /// switching model or rotating the credential; every wait is announced
    /// through `reporter` and ends early when `cancel` fires.
    pub async fn ask_model(
        &self,
        credential: &str,
        record: &QuestionRecord,
        reporter: &dyn StatusReporter,
        cancel: &CancellationToken,
    ) -> Result<AnswerResult, AskError> {
        if credential.trim().is_empty() {
            return Err(AskError::MissingCredential);
        }

        let trace_id = format!("q-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
        let request = GenerateContentRequest::from_prompt(
            format_question_prompt(record),
            self.temperature,
            self.max_output_tokens,
        );

        let mut session =
            RetrySession::new(credential.trim(), self.cursor.get(self.roster.len()));
        let mut generation = self.rotation_generation.load(Ordering::Acquire);

        info!(
            "[{}] Asking {} ({} question, key {})",
            trace_id,
            self.model_at(session.current_model_index),
            record.question_type,
            mask_credential(&session.current_credential)
        );

        loop {
            self.pacer.pace(&trace_id, reporter, cancel).await?;

            let model = self.model_at(session.current_model_index);
            session.attempts += 1;
            debug!("[{}] Attempt {} on {}", trace_id, session.attempts, model);

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    return Err(AskError::Cancelled { stage: "request".to_string() });
                },
                reply = self.client.generate_content(model, &session.current_credential, &request) => {
                    match reply {
                        Ok(reply) => classify(&reply),
                        Err(e) => AttemptOutcome::from_transport_error(e),
                    }
                },
            };

            let step = plan_next(&mut session, outcome, &self.policy, &self.roster);
            self.cursor.set(session.current_model_index);

            match step {
                NextStep::Parse(text) => {
                    let result = parse_answer(&text)?;
                    info!("[{}] Answered after {} attempt(s)", trace_id, session.attempts);
                    return Ok(result);
                },
                NextStep::Retry { delay, notice, stage } => {
                    announce_and_wait(&trace_id, notice, delay, reporter, cancel, stage).await?;
                },
                NextStep::Rotate(cause) => {
                    let credential = self
                        .rotate(&trace_id, cause, &session.current_credential, &mut generation, reporter, cancel)
                        .await?;
                    session.reset_for_credential(credential);
                },
                NextStep::Fail(error) => {
                    if let AskError::ApiError { status, message } = &error {
                        let notice =
                            StatusUpdate::error(format!("API Error ({}): {}", status, message));
                        trace_status(&trace_id, &notice);
                        reporter.report(notice).await;
                    } else {
                        warn!("[{}] Giving up: {}", trace_id, error);
                    }
                    return Err(error);
                },
            }
        }
    }

    fn model_at(&self, index: usize) -> &str {
        self.roster.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Replace the credential, at most once per exhaustion across callers.
    ///
    /// A caller that queued behind another rotation adopts the stored key
    /// instead of rotating again.
    async fn rotate(
        &self,
        trace_id: &str,
        cause: RotationCause,
        stale: &str,
        generation: &mut u64,
        reporter: &dyn StatusReporter,
        cancel: &CancellationToken,
    ) -> Result<String, AskError> {
        let notice = cause.notice();
        trace_status(trace_id, &notice);
        reporter.report(notice).await;

        let _gate = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(AskError::Cancelled { stage: "key rotation".to_string() });
            },
            guard = self.rotation_gate.lock() => guard,
        };

        let current = self.rotation_generation.load(Ordering::Acquire);
        if current != *generation {
            let stored = self.store.get().await.map_err(|e| RotationError::Failed {
                message: format!("failed to read rotated key: {}", e),
            })?;
            if let Some(fresh) = stored.filter(|k| k != stale) {
                info!("[{}] Key already rotated by a concurrent request", trace_id);
                *generation = current;
                return Ok(fresh);
            }
        }

        let fresh = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(AskError::Cancelled { stage: "key rotation".to_string() });
            },
            result = self.rotator.request_rotated_credential() => match result {
                Ok(fresh) => fresh,
                Err(RotationError::Disabled) if cause == RotationCause::ModelsExhausted => {
                    warn!("[{}] All models rate limited and rotation is disabled", trace_id);
                    return Err(AskError::ApiError {
                        status: 429,
                        message: "All models are rate limited and key rotation is disabled".to_string(),
                    });
                },
                Err(e) => return Err(e.into()),
            },
        };
        check_cancelled(cancel, "key rotation")?;

        self.store.set(&fresh).await.map_err(|e| RotationError::Failed {
            message: format!("failed to store rotated key: {}", e),
        })?;
        *generation = self.rotation_generation.fetch_add(1, Ordering::AcqRel) + 1;

        let done = StatusUpdate::success("Key rotation successful. Resuming...");
        trace_status(trace_id, &done);
        reporter.report(done).await;
        info!("[{}] Now using key {}", trace_id, mask_credential(&fresh));

        Ok(fresh)
    }
}

//! Pure transitions of the retry state machine.
//!
//! [`plan_next`] updates the session counters for one attempt outcome and
//! says what the executor must do next; it performs no I/O, so every
//! transition can be checked without a network or a clock.

use std::time::Duration;

use quizpilot_types::{AskError, RetryPolicy, StatusUpdate};

use super::attempt::AttemptOutcome;
use super::policy::{decide_rate_limit, exhaustion_threshold, RateLimitDecision};
use super::retry::{backoff_delay, parse_retry_after_secs};
use super::session::RetrySession;

/// Why the credential is being replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCause {
    ModelsExhausted,
    InvalidCredential,
}

impl RotationCause {
    pub fn notice(&self) -> StatusUpdate {
        match self {
            Self::ModelsExhausted => StatusUpdate::action(
                "All models exhausted. Opening the provider console to rotate key...",
            ),
            Self::InvalidCredential => {
                StatusUpdate::action("Invalid API Key detected. Rotating key...")
            },
        }
    }
}

/// Executor action following an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum NextStep {
    /// Report, wait, then send again
    Retry { delay: Duration, notice: StatusUpdate, stage: &'static str },
    /// Obtain a new credential, reset counters, send again
    Rotate(RotationCause),
    /// Hand the completion text to the parser
    Parse(String),
    /// Stop with this error
    Fail(AskError),
}

/// Apply one outcome to `session` and decide the next step.
pub fn plan_next(
    session: &mut RetrySession,
    outcome: AttemptOutcome,
    policy: &RetryPolicy,
    roster: &[String],
) -> NextStep {
    let can_retry = session.retry_count < policy.max_retries;
    let model_name = |index: usize| roster.get(index).map(String::as_str).unwrap_or("unknown");

    match outcome {
        AttemptOutcome::Completed(text) => NextStep::Parse(text),

        AttemptOutcome::RateLimited { message, retry_after_secs } if can_retry => {
            match decide_rate_limit(
                session.is_same_model_retry,
                session.switch_count,
                roster.len(),
                policy.exhaustion_factor,
            ) {
                RateLimitDecision::WaitSameModel => {
                    let delay = parse_retry_after_secs(&message)
                        .or(retry_after_secs)
                        .map(|secs| {
                            Duration::from_millis(
                                secs.saturating_mul(1000).saturating_add(policy.rate_limit_buffer_ms),
                            )
                        })
                        .unwrap_or(Duration::from_millis(policy.default_rate_limit_wait_ms));
                    let notice = StatusUpdate::warning(format!(
                        "Rate limit on {}. Waiting {}s...",
                        model_name(session.current_model_index),
                        delay.as_millis().div_ceil(1000)
                    ));
                    session.is_same_model_retry = true;
                    NextStep::Retry { delay, notice, stage: "rate limit wait" }
                },
                RateLimitDecision::SwitchModel => {
                    let limit = exhaustion_threshold(roster.len(), policy.exhaustion_factor);
                    session.advance_model(roster.len());
                    let notice = StatusUpdate::warning(format!(
                        "Rate limit persists. Switching to {} (Attempt {}/{})...",
                        model_name(session.current_model_index),
                        session.switch_count + 1,
                        limit
                    ));
                    session.is_same_model_retry = false;
                    session.switch_count += 1;
                    NextStep::Retry {
                        delay: Duration::from_millis(policy.model_switch_delay_ms),
                        notice,
                        stage: "rate limit switch",
                    }
                },
                RateLimitDecision::RotateCredential
                    if session.rotations >= policy.max_rotations =>
                {
                    NextStep::Fail(AskError::ApiError { status: 429, message })
                },
                RateLimitDecision::RotateCredential => {
                    NextStep::Rotate(RotationCause::ModelsExhausted)
                },
            }
        },
        AttemptOutcome::RateLimited { message, .. } => {
            NextStep::Fail(AskError::ApiError { status: 429, message })
        },

        AttemptOutcome::ServerError { status, .. } if can_retry => {
            let delay = backoff_delay(policy.retry_delay_ms, session.retry_count);
            session.retry_count += 1;
            NextStep::Retry {
                delay,
                notice: StatusUpdate::warning(format!("Server error ({}). Retrying...", status)),
                stage: "server error wait",
            }
        },
        AttemptOutcome::ServerError { status, message } => {
            NextStep::Fail(AskError::ApiError { status, message })
        },

        AttemptOutcome::InvalidCredential { message } if session.rotations >= policy.max_rotations => {
            NextStep::Fail(AskError::ApiError { status: 400, message })
        },
        AttemptOutcome::InvalidCredential { .. } => {
            NextStep::Rotate(RotationCause::InvalidCredential)
        },

        AttemptOutcome::Truncated { .. } if can_retry => {
            let delay = backoff_delay(policy.retry_delay_ms, session.retry_count);
            session.retry_count += 1;
            NextStep::Retry {
                delay,
                notice: StatusUpdate::warning("Response truncated (Max Tokens). Retrying..."),
                stage: "retry",
            }
        },
        AttemptOutcome::Truncated { payload } => NextStep::Fail(AskError::Stopped {
            reason: quizpilot_types::protocol::gemini::FINISH_REASON_MAX_TOKENS.to_string(),
            payload,
        }),

        AttemptOutcome::Network { .. } if can_retry => {
            let delay = backoff_delay(policy.retry_delay_ms, session.retry_count);
            session.retry_count += 1;
            NextStep::Retry {
                delay,
                notice: StatusUpdate::warning("Network error. Retrying..."),
                stage: "retry",
            }
        },
        AttemptOutcome::Network { message } => NextStep::Fail(AskError::Network { message }),

        AttemptOutcome::Failed(error) => NextStep::Fail(error),
    }
}

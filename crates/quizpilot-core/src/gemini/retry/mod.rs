//! Backoff arithmetic and cancellable waits.

pub mod error_parsing;

pub use error_parsing::{extract_error_message, is_invalid_credential_message, parse_retry_after_secs};

use std::time::Duration;

use quizpilot_types::{AskError, StatusUpdate};
use tokio_util::sync::CancellationToken;

use super::status::{trace_status, StatusReporter};

/// `base_ms × 2^retry_count`, saturating.
pub fn backoff_delay(base_ms: u64, retry_count: u32) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(2_u64.saturating_pow(retry_count)))
}

/// Sleep unless `cancel` fires first.
pub async fn wait_cancellable(
    delay: Duration,
    cancel: &CancellationToken,
    stage: &str,
) -> Result<(), AskError> {
    if delay.is_zero() {
        return check_cancelled(cancel, stage);
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AskError::Cancelled { stage: stage.to_string() }),
        () = tokio::time::sleep(delay) => Ok(()),
    }
}

pub fn check_cancelled(cancel: &CancellationToken, stage: &str) -> Result<(), AskError> {
    if cancel.is_cancelled() {
        return Err(AskError::Cancelled { stage: stage.to_string() });
    }
    Ok(())
}

/// Report `update`, then wait `delay`.
///
/// A reporter answering `false` or a fired token ends the wait with `Cancelled`.
pub async fn announce_and_wait(
    trace_id: &str,
    update: StatusUpdate,
    delay: Duration,
    reporter: &dyn StatusReporter,
    cancel: &CancellationToken,
    stage: &str,
) -> Result<(), AskError> {
    check_cancelled(cancel, stage)?;
    trace_status(trace_id, &update);
    if !reporter.report(update).await {
        tracing::info!("[{}] Caller stopped the request during {}", trace_id, stage);
        return Err(AskError::Cancelled { stage: stage.to_string() });
    }
    wait_cancellable(delay, cancel, stage).await
}

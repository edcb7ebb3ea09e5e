//! Progress reporting back to the caller.

use async_trait::async_trait;
use quizpilot_types::{StatusLevel, StatusUpdate};

/// Receives progress notices; returning `false` asks the engine to stop.
#[async_trait]
pub trait StatusReporter: Send + Sync {
    async fn report(&self, update: StatusUpdate) -> bool;
}

/// Reporter that accepts everything.
pub struct NoopReporter;

#[async_trait]
impl StatusReporter for NoopReporter {
    async fn report(&self, _update: StatusUpdate) -> bool {
        true
    }
}

#[async_trait]
impl<F> StatusReporter for F
where
    F: Fn(StatusUpdate) -> bool + Send + Sync,
{
    async fn report(&self, update: StatusUpdate) -> bool {
        self(update)
    }
}

/// Mirror a notice into the log at a matching level.
pub(crate) fn trace_status(trace_id: &str, update: &StatusUpdate) {
    match update.level {
        StatusLevel::Error => tracing::error!("[{}] {}", trace_id, update.message),
        StatusLevel::Warning => tracing::warn!("[{}] {}", trace_id, update.message),
        StatusLevel::Info | StatusLevel::Action | StatusLevel::Success => {
            tracing::info!("[{}] {}", trace_id, update.message)
        },
    }
}

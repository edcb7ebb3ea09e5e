//! Minimum spacing between outbound requests.

use std::time::Duration;

use parking_lot::Mutex;
use quizpilot_types::{AskError, StatusUpdate};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::retry::announce_and_wait;
use super::status::StatusReporter;

/// Gates requests so that at least `min_interval` passes between them.
///
/// With a zero interval pacing is purely reactive: the only waits come from
/// server-reported rate limits handled by the executor.
pub struct RatePacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RatePacer {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_request: Mutex::new(None) }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time the next request still has to wait.
    pub fn remaining(&self) -> Option<Duration> {
        let last = (*self.last_request.lock())?;
        let elapsed = last.elapsed();
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }

    /// Wait out the remainder of the interval, then stamp the request time.
    pub async fn pace(
        &self,
        trace_id: &str,
        reporter: &dyn StatusReporter,
        cancel: &CancellationToken,
    ) -> Result<(), AskError> {
        if let Some(wait) = self.remaining() {
            let notice =
                StatusUpdate::action(format!("Pacing request... ({:.1}s)", wait.as_secs_f64()));
            announce_and_wait(trace_id, notice, wait, reporter, cancel, "pacing").await?;
        }
        *self.last_request.lock() = Some(Instant::now());
        Ok(())
    }
}

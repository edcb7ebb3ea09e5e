//! Rotation by waiting for an operator to supply a fresh key.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use quizpilot_types::{RotationConfig, RotationError};
use tokio::sync::Notify;
use tracing::{info, warn};

use super::CredentialRotator;

const STAGE: &str = "manual key entry";

/// Parks the rotation until [`ManualRotator::supply`] is called.
///
/// Waiting is bounded by the same poll budget the console rotator uses.
pub struct ManualRotator {
    slot: Mutex<Option<String>>,
    pending: AtomicBool,
    notify: Notify,
    poll_interval: Duration,
    max_polls: u32,
}

impl ManualRotator {
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            slot: Mutex::new(None),
            pending: AtomicBool::new(false),
            notify: Notify::new(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_polls: config.max_polls,
        }
    }

    /// Hand a key to the waiting rotation. Returns `false` if nobody was waiting.
    pub fn supply(&self, credential: impl Into<String>) -> bool {
        let credential = credential.into();
        if credential.trim().is_empty() {
            return false;
        }
        if !self.pending.load(Ordering::Acquire) {
            return false;
        }
        *self.slot.lock() = Some(credential.trim().to_string());
        self.notify.notify_one();
        true
    }

    /// A rotation is currently waiting for a key.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    async fn wait_for_key(&self) -> Result<String, RotationError> {
        for attempt in 1..=self.max_polls {
            if let Some(key) = self.slot.lock().take() {
                return Ok(key);
            }
            if tokio::time::timeout(self.poll_interval, self.notify.notified()).await.is_err() {
                tracing::debug!("Waiting for a new key ({}/{})", attempt, self.max_polls);
            }
        }
        self.slot
            .lock()
            .take()
            .ok_or(RotationError::Timeout { stage: STAGE.to_string(), attempts: self.max_polls })
    }
}

/// Clears the waiting flag and any unclaimed key when the rotation ends,
/// including when the caller drops the future mid-wait.
struct Waiting<'a> {
    rotator: &'a ManualRotator,
}

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        self.rotator.slot.lock().take();
        self.rotator.pending.store(false, Ordering::Release);
    }
}

#[async_trait]
impl CredentialRotator for ManualRotator {
    async fn request_rotated_credential(&self) -> Result<String, RotationError> {
        if self.pending.swap(true, Ordering::AcqRel) {
            return Err(RotationError::Failed {
                message: "a rotation is already waiting for a key".to_string(),
            });
        }
        let _waiting = Waiting { rotator: self };
        info!("Waiting for a replacement API key to be supplied");

        let result = self.wait_for_key().await;

        if let Err(e) = &result {
            warn!("Manual rotation ended without a key: {}", e);
        }
        result
    }
}

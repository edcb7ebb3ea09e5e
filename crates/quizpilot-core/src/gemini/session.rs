//! Per-call retry state and the engine-wide model cursor.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Mutable state threaded through the attempts of one `ask_model` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySession {
    /// Server-error and network-class retries spent on this credential
    pub retry_count: u32,
    /// The current model already got its grace wait
    pub is_same_model_retry: bool,
    /// Model switches since the last credential change
    pub switch_count: u32,
    pub current_model_index: usize,
    pub current_credential: String,
    /// Attempts issued so far, across credentials
    pub attempts: u32,
    /// Credentials obtained by rotation during this call
    pub rotations: u32,
}

impl RetrySession {
    pub fn new(credential: impl Into<String>, model_index: usize) -> Self {
        Self {
            retry_count: 0,
            is_same_model_retry: false,
            switch_count: 0,
            current_model_index: model_index,
            current_credential: credential.into(),
            attempts: 0,
            rotations: 0,
        }
    }

    /// Move to the next model in the roster, wrapping.
    pub fn advance_model(&mut self, model_count: usize) {
        if model_count > 0 {
            self.current_model_index = (self.current_model_index + 1) % model_count;
        }
    }

    /// Start over on a fresh credential.
    pub fn reset_for_credential(&mut self, credential: impl Into<String>) {
        self.current_credential = credential.into();
        self.retry_count = 0;
        self.switch_count = 0;
        self.is_same_model_retry = false;
        self.rotations += 1;
    }
}

/// Model index remembered between calls on one executor.
///
/// A model abandoned for rate limiting stays abandoned for the next question.
#[derive(Debug, Default)]
pub struct ModelCursor {
    index: AtomicUsize,
}

impl ModelCursor {
    pub fn new(index: usize) -> Self {
        Self { index: AtomicUsize::new(index) }
    }

    /// Current index, clamped into a roster of `model_count` entries.
    pub fn get(&self, model_count: usize) -> usize {
        let index = self.index.load(Ordering::Acquire);
        if model_count == 0 {
            0
        } else {
            index % model_count
        }
    }

    pub fn set(&self, index: usize) {
        self.index.store(index, Ordering::Release);
    }
}

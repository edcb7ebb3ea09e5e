//! Application State
//!
//! Holds the question processor, the credential store and the status feed.

use anyhow::Result;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quizpilot_core::{
    CredentialRotator, CredentialStore, DisabledRotator, FileCredentialStore, GeminiClient,
    ManualRotator, QuestionProcessor, RequestExecutor,
};
use quizpilot_types::{AppConfig, RotationMode};

use crate::status_feed::StatusFeed;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub data_dir: PathBuf,
    pub config: RwLock<AppConfig>,
    pub processor: Arc<QuestionProcessor>,
    pub store: Arc<FileCredentialStore>,
    /// Present when rotation waits for a key from the settings surface
    pub manual_rotator: Option<Arc<ManualRotator>>,
    pub events: StatusFeed,
}

impl AppState {
    /// Wire the answer engine for `config`, persisting under `data_dir`.
    pub fn new(data_dir: &Path, config: AppConfig) -> Result<Self> {
        let client = GeminiClient::new(&config.gemini)?;
        let store = Arc::new(FileCredentialStore::new(data_dir));

        let manual_rotator = match config.rotation.mode {
            RotationMode::Manual => Some(Arc::new(ManualRotator::new(&config.rotation))),
            RotationMode::Disabled => None,
        };
        let rotator: Arc<dyn CredentialRotator> = match &manual_rotator {
            Some(manual) => manual.clone(),
            None => Arc::new(DisabledRotator),
        };

        let executor = RequestExecutor::new(client, &config, store.clone(), rotator)?;
        tracing::info!(
            "Answer engine ready: {} models, starting on {}",
            executor.roster().len(),
            executor.current_model()
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                data_dir: data_dir.to_path_buf(),
                config: RwLock::new(config),
                processor: Arc::new(QuestionProcessor::new(Arc::new(executor))),
                store,
                manual_rotator,
                events: StatusFeed::new(),
            }),
        })
    }

    pub fn processor(&self) -> &Arc<QuestionProcessor> {
        &self.inner.processor
    }

    pub fn store(&self) -> &dyn CredentialStore {
        self.inner.store.as_ref()
    }

    pub fn events(&self) -> &StatusFeed {
        &self.inner.events
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    pub fn config(&self) -> AppConfig {
        self.inner.config.read().clone()
    }

    pub fn replace_config(&self, config: AppConfig) {
        *self.inner.config.write() = config;
    }

    /// Feed a waiting manual rotation. Returns `true` if one was waiting.
    pub fn supply_rotated_credential(&self, credential: &str) -> bool {
        self.inner
            .manual_rotator
            .as_ref()
            .is_some_and(|rotator| rotator.supply(credential))
    }
}

//! Rotation by driving the provider's web console.
//!
//! A host-controlled surface (browser tab plus injected page agent) does the
//! clicking; this module only sequences it: open the projects page, poll the
//! agent until stale projects are cleaned up, navigate to the keys page, poll
//! the agent until it reports a freshly created key.

use std::time::Duration;

use async_trait::async_trait;
use quizpilot_types::protocol::{AgentCommand, AgentReply};
use quizpilot_types::{RotationConfig, RotationError};
use tracing::{debug, info, warn};

use super::CredentialRotator;

pub type TabId = u64;

/// Browser-side capabilities needed for console rotation.
#[async_trait]
pub trait AutomationSurface: Send + Sync {
    async fn open_tab(&self, url: &str) -> Result<TabId, RotationError>;

    async fn navigate(&self, tab: TabId, url: &str) -> Result<(), RotationError>;

    /// Deliver a command to the page agent. `None` while no agent is listening.
    async fn send(&self, tab: TabId, command: AgentCommand) -> Option<AgentReply>;

    async fn close_tab(&self, tab: TabId);
}

pub struct ConsoleRotator<S> {
    surface: S,
    config: RotationConfig,
}

impl<S: AutomationSurface> ConsoleRotator<S> {
    pub fn new(surface: S, config: RotationConfig) -> Self {
        Self { surface, config }
    }

    /// Poll the agent until it settles the command or the budget runs out.
    async fn poll_agent(&self, tab: TabId, command: AgentCommand) -> Result<AgentReply, RotationError> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        let stage = command.stage();

        for attempt in 1..=self.config.max_polls {
            tokio::time::sleep(interval).await;

            let Some(reply) = self.surface.send(tab, command).await else {
                debug!("Waiting for {} agent ({}/{})", stage, attempt, self.config.max_polls);
                continue;
            };

            if reply.busy {
                debug!("Agent busy with {} ({}/{})", stage, attempt, self.config.max_polls);
                continue;
            }

            match command {
                AgentCommand::PerformProjectCleanup if reply.success => return Ok(reply),
                AgentCommand::PerformKeyRotation
                    if reply.success && reply.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) =>
                {
                    return Ok(reply)
                },
                _ => {},
            }

            if let Some(error) = reply.error {
                warn!("{} failed: {}", stage, error);
                return Err(RotationError::Failed { message: error });
            }
            if command == AgentCommand::PerformProjectCleanup {
                return Err(RotationError::Failed { message: format!("{} failed", stage) });
            }
        }

        Err(RotationError::Timeout { stage: stage.to_string(), attempts: self.config.max_polls })
    }
}

#[async_trait]
impl<S: AutomationSurface> CredentialRotator for ConsoleRotator<S> {
    async fn request_rotated_credential(&self) -> Result<String, RotationError> {
        info!("Opening provider console for key rotation");
        let tab = self.surface.open_tab(&self.config.projects_url).await?;

        self.poll_agent(tab, AgentCommand::PerformProjectCleanup).await?;
        info!("Project cleanup finished. Proceeding to key rotation...");

        self.surface.navigate(tab, &self.config.keys_url).await?;
        let reply = self.poll_agent(tab, AgentCommand::PerformKeyRotation).await?;

        let api_key = reply
            .api_key
            .map(|k| k.trim().to_string())
            .ok_or_else(|| RotationError::Failed { message: "agent returned no key".to_string() })?;

        self.surface.close_tab(tab).await;
        info!("Key rotation finished");
        Ok(api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Scripted surface: replies are popped per command; an empty queue means
    /// "agent not loaded".
    #[derive(Default)]
    struct FakeSurface {
        cleanup: Mutex<VecDeque<Option<AgentReply>>>,
        rotation: Mutex<VecDeque<Option<AgentReply>>>,
        log: Mutex<Vec<String>>,
    }

    impl FakeSurface {
        fn with(cleanup: Vec<Option<AgentReply>>, rotation: Vec<Option<AgentReply>>) -> Self {
            Self {
                cleanup: Mutex::new(cleanup.into()),
                rotation: Mutex::new(rotation.into()),
                log: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl<'a> AutomationSurface for &'a FakeSurface {
        async fn open_tab(&self, url: &str) -> Result<TabId, RotationError> {
            self.log.lock().push(format!("open {url}"));
            Ok(7)
        }

        async fn navigate(&self, tab: TabId, url: &str) -> Result<(), RotationError> {
            self.log.lock().push(format!("navigate {tab} {url}"));
            Ok(())
        }

        async fn send(&self, _tab: TabId, command: AgentCommand) -> Option<AgentReply> {
            let queue = match command {
                AgentCommand::PerformProjectCleanup => &self.cleanup,
                AgentCommand::PerformKeyRotation => &self.rotation,
            };
            queue.lock().pop_front().flatten()
        }

        async fn close_tab(&self, tab: TabId) {
            self.log.lock().push(format!("close {tab}"));
        }
    }

    fn ok() -> Option<AgentReply> {
        Some(AgentReply { success: true, ..Default::default() })
    }

    fn key(k: &str) -> Option<AgentReply> {
        Some(AgentReply { success: true, api_key: Some(k.to_string()), ..Default::default() })
    }

    fn config(max_polls: u32) -> RotationConfig {
        RotationConfig {
            projects_url: "https://console.test/projects".to_string(),
            keys_url: "https://console.test/keys".to_string(),
            poll_interval_ms: 2000,
            max_polls,
            ..RotationConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_rotation_sequence() {
        let busy = Some(AgentReply { success: false, busy: true, ..Default::default() });
        let surface = FakeSurface::with(vec![None, None, ok()], vec![None, busy, key(" NEWKEY ")]);
        let rotator = ConsoleRotator::new(&surface, config(60));

        let start = tokio::time::Instant::now();
        let new_key = rotator.request_rotated_credential().await.unwrap();

        assert_eq!(new_key, "NEWKEY");
        assert_eq!(
            *surface.log.lock(),
            vec![
                "open https://console.test/projects".to_string(),
                "navigate 7 https://console.test/keys".to_string(),
                "close 7".to_string(),
            ]
        );
        assert_eq!(start.elapsed(), Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_timeout() {
        let surface = FakeSurface::default();
        let rotator = ConsoleRotator::new(&surface, config(5));

        let err = rotator.request_rotated_credential().await.unwrap_err();
        assert_eq!(
            err,
            RotationError::Timeout { stage: "project cleanup".to_string(), attempts: 5 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_agent_error_fails_rotation() {
        let failure = Some(AgentReply {
            success: false,
            error: Some("Create key button not found".to_string()),
            ..Default::default()
        });
        let surface = FakeSurface::with(vec![ok()], vec![failure]);
        let rotator = ConsoleRotator::new(&surface, config(60));

        let err = rotator.request_rotated_credential().await.unwrap_err();
        assert_eq!(err, RotationError::Failed { message: "Create key button not found".to_string() });
        assert!(!surface.log.lock().iter().any(|l| l.starts_with("close")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_failure_without_message() {
        let surface = FakeSurface::with(vec![Some(AgentReply::default())], vec![]);
        let rotator = ConsoleRotator::new(&surface, config(60));
        let err = rotator.request_rotated_credential().await.unwrap_err();
        assert!(matches!(err, RotationError::Failed { .. }));
    }
}

//! Messages exchanged with the page-resident automation agent.

use serde::{Deserialize, Serialize};

/// Command sent to the agent running inside the provider console tab.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AgentCommand {
    /// Delete cloud projects tied to the stale credential
    PerformProjectCleanup,
    /// Delete every key and create a fresh one
    PerformKeyRotation,
}

impl AgentCommand {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::PerformProjectCleanup => "project cleanup",
            Self::PerformKeyRotation => "key rotation",
        }
    }
}

/// Agent reply. `busy` means a rotation is already running in that tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub busy: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_names() {
        assert_eq!(
            serde_json::to_string(&AgentCommand::PerformKeyRotation).unwrap(),
            r#"{"type":"performKeyRotation"}"#
        );
        assert_eq!(
            serde_json::to_string(&AgentCommand::PerformProjectCleanup).unwrap(),
            r#"{"type":"performProjectCleanup"}"#
        );
    }

    #[test]
    fn test_reply_parses_busy() {
        let reply: AgentReply = serde_json::from_str(r#"{"success":false,"busy":true}"#).unwrap();
        assert!(reply.busy);
        assert!(reply.api_key.is_none());
    }
}

//! Credential rotation.
//!
//! The retry state machine only sees [`CredentialRotator`]. The console
//! automation and the manual fallback are interchangeable behind it.

mod console;
mod manual;

pub use console::{AutomationSurface, ConsoleRotator, TabId};
pub use manual::ManualRotator;

use async_trait::async_trait;
use quizpilot_types::RotationError;

/// Produces a replacement credential when the current one is exhausted or dead.
#[async_trait]
pub trait CredentialRotator: Send + Sync {
    async fn request_rotated_credential(&self) -> Result<String, RotationError>;
}

/// Rotator for setups where rotation is turned off.
pub struct DisabledRotator;

#[async_trait]
impl CredentialRotator for DisabledRotator {
    async fn request_rotated_credential(&self) -> Result<String, RotationError> {
        Err(RotationError::Disabled)
    }
}

//! Configuration models.

mod app;
mod gemini;
mod retry;
mod rotation;

pub use app::{AppConfig, PacingConfig, ServerConfig};
pub use gemini::GeminiConfig;
pub use retry::RetryPolicy;
pub use rotation::{RotationConfig, RotationMode};

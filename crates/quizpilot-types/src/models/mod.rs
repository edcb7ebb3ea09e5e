//! Core domain models for QuizPilot.
//!
//! This module contains the shared data structures exchanged between the
//! scraper, the answer engine, and the settings surface.

mod answer;
mod config;
mod credential;
mod question;
mod status;

// Re-export all models
pub use answer::{Answer, AnswerResult};
pub use config::{
    AppConfig, GeminiConfig, PacingConfig, RetryPolicy, RotationConfig, RotationMode,
    ServerConfig,
};
pub use credential::CredentialCheck;
pub use question::{OptionSet, PreviousCorrection, QuestionRecord, QuestionType};
pub use status::{StatusLevel, StatusUpdate};

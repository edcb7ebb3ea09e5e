//! # QuizPilot Types
//!
//! Core types, wire protocol, and error definitions for QuizPilot.
//!
//! This crate provides the foundational type system for the QuizPilot workspace:
//!
//! - **`error`** - Typed error hierarchy for answering, rotation, and configuration
//! - **`models`** - Domain models (QuestionRecord, AnswerResult, StatusUpdate, AppConfig)
//! - **`protocol`** - Gemini `generateContent` and automation-agent message types
//!
//! ## Architecture Role
//!
//! `quizpilot-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!        quizpilot-types (this crate)
//!                 │
//!                 ▼
//!          quizpilot-core
//!                 │
//!                 ▼
//!         quizpilot-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for the HTTP API and on-disk config
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;
pub mod protocol;

// Re-export error types for convenience
pub use error::{AskError, ConfigError, Result, RotationError, TypedError};

// Re-export core model types
pub use models::{
    Answer, AnswerResult, AppConfig, CredentialCheck, GeminiConfig, OptionSet, PacingConfig, PreviousCorrection,
    QuestionRecord, QuestionType, RetryPolicy, RotationConfig, RotationMode, ServerConfig,
    StatusLevel, StatusUpdate,
};

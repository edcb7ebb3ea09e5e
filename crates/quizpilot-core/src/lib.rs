//! # QuizPilot Core
//!
//! Answer engine for QuizPilot.
//!
//! ```text
//! quizpilot-core/src/
//! ├── gemini/           # prompt, pacer, retry state machine, response parser
//! │   ├── upstream/     # HTTP client for generateContent + key validation
//! │   └── retry/        # backoff, cancellable waits, error-text parsing
//! ├── rotation/         # credential rotators (console automation, manual)
//! ├── processor.rs      # single-flight question processing
//! └── modules/          # data dir, config file, credential store, logging
//! ```
//!
//! A question flows `QuestionRecord → prompt → pacer → generateContent →
//! classify → (retry | switch model | rotate key) → parse → AnswerResult`.

#![cfg_attr(
    test,
    allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)
)]

pub mod error;
pub mod gemini;
pub mod modules;
pub mod processor;
pub mod rotation;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use gemini::{GeminiClient, NoopReporter, RequestExecutor, StatusReporter};
pub use modules::credential::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use processor::{alert_message, ProcessError, QuestionProcessor};
pub use rotation::{
    AutomationSurface, ConsoleRotator, CredentialRotator, DisabledRotator, ManualRotator,
};
pub use tokio_util::sync::CancellationToken;

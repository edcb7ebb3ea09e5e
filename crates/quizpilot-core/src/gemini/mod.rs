//! Gemini answer engine.
//!
//! [`RequestExecutor::ask_model`] drives one question through the retry state
//! machine; every other module here is a leaf it composes.

pub mod attempt;
pub mod executor;
pub mod pacer;
pub mod policy;
pub mod prompt;
pub mod response_parser;
pub mod retry;
pub mod session;
pub mod state_machine;
pub mod status;
pub mod upstream;


pub use executor::RequestExecutor;
pub use pacer::RatePacer;
pub use prompt::format_question_prompt;
pub use response_parser::parse_answer;
pub use status::{NoopReporter, StatusReporter};
pub use upstream::{CredentialCheck, GeminiClient};

//! Protocol definitions for external peers.
//!
//! - Google Gemini (`generateContent` API)
//! - Page-resident automation agent used during credential rotation

pub mod agent;
pub mod gemini;

pub use agent::{AgentCommand, AgentReply};
pub use gemini::{
    ApiErrorBody, GeminiCandidate, GeminiContent, GeminiPart, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, SafetySetting,
};

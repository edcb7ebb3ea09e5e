//! Answers returned by the model.

use serde::{Deserialize, Serialize};

/// An answer is either one option/string or an ordered list of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    /// True when there is nothing to inject into the page.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Multiple(items) => items.is_empty(),
        }
    }

    /// All answer strings in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Multiple(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<Vec<String>> for Answer {
    fn from(items: Vec<String>) -> Self {
        Self::Multiple(items)
    }
}

/// Structured result handed back to the answer injector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerResult {
    pub answer: Answer,
    #[serde(default)]
    pub explanation: String,
}

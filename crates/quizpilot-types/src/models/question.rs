//! Question records produced by the page scraper.

use serde::{Deserialize, Serialize};

use super::answer::Answer;

/// Kind of quiz question, as reported by the scraper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    MultipleSelect,
    FillInTheBlank,
    Matching,
}

impl QuestionType {
    /// Wire name used in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::MultipleSelect => "multiple_select",
            Self::FillInTheBlank => "fill_in_the_blank",
            Self::Matching => "matching",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer options attached to a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OptionSet {
    /// Flat list for single- and multi-select questions
    List(Vec<String>),
    /// Prompt/choice columns for matching questions
    Matching { prompts: Vec<String>, choices: Vec<String> },
}

/// Feedback from the previous question that the model got wrong.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreviousCorrection {
    pub question: String,
    pub correct_answer: Answer,
}

impl PreviousCorrection {
    /// A correction is only worth sending when both halves carry text.
    pub fn is_applicable(&self) -> bool {
        !self.question.is_empty() && !self.correct_answer.is_blank()
    }
}

/// A scraped question, immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(rename = "question", alias = "questionText")]
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_correction: Option<PreviousCorrection>,
}

impl QuestionRecord {
    pub fn new(question_type: QuestionType, question_text: impl Into<String>) -> Self {
        Self {
            question_type,
            question_text: question_text.into(),
            options: None,
            previous_correction: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(OptionSet::List(options.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_matching<I, S>(mut self, prompts: I, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(OptionSet::Matching {
            prompts: prompts.into_iter().map(Into::into).collect(),
            choices: choices.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_correction(mut self, question: impl Into<String>, correct_answer: Answer) -> Self {
        self.previous_correction =
            Some(PreviousCorrection { question: question.into(), correct_answer });
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scraper_payload() {
        let json = r#"{
            "type": "multiple_select",
            "question": "Pick primes",
            "options": ["2.", "4.", "5."],
            "previousCorrection": {"question": "Q1", "correctAnswer": ["a", "b"]}
        }"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.question_type, QuestionType::MultipleSelect);
        assert_eq!(record.question_text, "Pick primes");
        assert_eq!(record.options, Some(OptionSet::List(vec!["2.".into(), "4.".into(), "5.".into()])));
        let correction = record.previous_correction.unwrap();
        assert_eq!(correction.correct_answer, Answer::Multiple(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_deserialize_matching_options() {
        let json = r#"{"type":"matching","questionText":"Match","options":{"prompts":["p"],"choices":["c"]}}"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.options,
            Some(OptionSet::Matching { prompts: vec!["p".into()], choices: vec!["c".into()] })
        );
    }

    #[test]
    fn test_blank_correction_not_applicable() {
        let correction = PreviousCorrection {
            question: "Q".to_string(),
            correct_answer: Answer::Single(String::new()),
        };
        assert!(!correction.is_applicable());
    }
}

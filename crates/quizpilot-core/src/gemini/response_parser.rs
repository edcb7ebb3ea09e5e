//! Completion text → [`AnswerResult`].

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use quizpilot_types::{Answer, AnswerResult, AskError};

static JSON_OBJECT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_json_object_regex() -> &'static Regex {
    JSON_OBJECT_REGEX.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("JSON object regex is valid"))
}

/// Extract the answer object from free-form model output.
///
/// Code fences and zero-width characters are stripped, then the text is parsed
/// as JSON; failing that, the widest `{...}` span is parsed instead.
pub fn parse_answer(text: &str) -> Result<AnswerResult, AskError> {
    let clean = text
        .replace("```json", "")
        .replace("```", "")
        .replace(['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'], "");
    let clean = clean.trim();

    let value = match serde_json::from_str::<Value>(clean) {
        Ok(value) => value,
        Err(_) => {
            let span = get_json_object_regex().find(clean).ok_or_else(|| {
                AskError::MalformedResponse { message: format!("Parse failed: {}", text) }
            })?;
            serde_json::from_str::<Value>(span.as_str()).map_err(|e| {
                AskError::MalformedResponse { message: format!("Parse failed ({}): {}", e, text) }
            })?
        },
    };

    let object = value.as_object().ok_or_else(|| AskError::MalformedResponse {
        message: format!("Response is not a JSON object: {}", text),
    })?;

    let answer = object
        .get("answer")
        .and_then(to_answer)
        .filter(|a| !a.is_blank())
        .ok_or_else(|| AskError::MalformedResponse {
            message: format!("Response missing 'answer' field: {}", text),
        })?;

    let explanation = match object.get("explanation") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(AnswerResult { answer, explanation })
}

fn to_answer(value: &Value) -> Option<Answer> {
    match value {
        Value::Array(items) => {
            items.iter().map(scalar_to_string).collect::<Option<Vec<_>>>().map(Answer::Multiple)
        },
        other => scalar_to_string(other).map(Answer::Single),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json() {
        let text = "```json\n{\"answer\":\"B\",\"explanation\":\"x\"}\n```";
        let result = parse_answer(text).unwrap();
        assert_eq!(
            result,
            AnswerResult { answer: Answer::Single("B".to_string()), explanation: "x".to_string() }
        );
    }

    #[test]
    fn test_trailing_prose_is_ignored() {
        let text = "{\"answer\": [\"Whale.\", \"Bat.\"], \"explanation\": \"Both nurse young.\"}\nHope this helps!";
        let result = parse_answer(text).unwrap();
        assert_eq!(result.answer, Answer::Multiple(vec!["Whale.".into(), "Bat.".into()]));
        assert_eq!(result.explanation, "Both nurse young.");
    }

    #[test]
    fn test_leading_prose_and_zero_width() {
        let text = "Sure! Here you go:\u{200B} {\"answer\":\"True\",\"explanation\":\"Rayleigh scattering.\"}";
        assert_eq!(parse_answer(text).unwrap().answer, Answer::Single("True".to_string()));
    }

    #[test]
    fn test_scalar_answers_are_stringified() {
        assert_eq!(parse_answer(r#"{"answer": 42}"#).unwrap().answer, Answer::Single("42".into()));
        assert_eq!(parse_answer(r#"{"answer": false}"#).unwrap().answer, Answer::Single("false".into()));
        assert_eq!(parse_answer(r#"{"answer": "x"}"#).unwrap().explanation, "");
    }

    #[test]
    fn test_missing_or_null_answer_is_malformed() {
        for text in [
            r#"{"explanation":"no answer"}"#,
            r#"{"answer":null,"explanation":"x"}"#,
            r#"{"answer":"","explanation":"x"}"#,
            r#"{"answer":[],"explanation":"x"}"#,
            r#"["A"]"#,
        ] {
            let err = parse_answer(text).unwrap_err();
            assert!(matches!(err, AskError::MalformedResponse { .. }), "{text}");
        }
    }

    #[test]
    fn test_no_json_at_all() {
        let err = parse_answer("I think the answer is B.").unwrap_err();
        assert!(matches!(err, AskError::MalformedResponse { ref message } if message.starts_with("Parse failed")));
    }
}

//! Pulling retry hints and error messages out of provider error payloads.

use regex::Regex;
use std::sync::OnceLock;

use quizpilot_types::protocol::ApiErrorBody;

static RETRY_AFTER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Phrases the provider uses when the key itself is deleted or invalid.
const INVALID_CREDENTIAL_PATTERNS: &[&str] =
    &["api key not found", "api key not valid", "check your api key"];

pub fn get_retry_after_regex() -> &'static Regex {
    RETRY_AFTER_REGEX.get_or_init(|| {
        Regex::new(r"(?i)retry after (\d+) seconds").expect("Retry after regex is valid")
    })
}

/// Seconds from a "retry after N seconds" phrase.
pub fn parse_retry_after_secs(message: &str) -> Option<u64> {
    let caps = get_retry_after_regex().captures(message)?;
    let secs = caps.get(1)?.as_str().parse::<u64>().ok()?;
    tracing::debug!("[retry-after] server requested wait: {}s", secs);
    Some(secs)
}

/// `error.message` from a provider error body, if the body is JSON.
pub fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ApiErrorBody = serde_json::from_str(body.trim()).ok()?;
    parsed.message().map(str::to_string)
}

/// True for 400 messages meaning the credential was deleted or is invalid.
pub fn is_invalid_credential_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    INVALID_CREDENTIAL_PATTERNS.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after_secs("Quota exceeded. Please retry after 17 seconds."), Some(17));
        assert_eq!(parse_retry_after_secs("RETRY AFTER 3 SECONDS"), Some(3));
        assert_eq!(parse_retry_after_secs("Resource exhausted"), None);
        assert_eq!(parse_retry_after_secs("retry after soon seconds"), None);
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("API key not valid. Please pass a valid API key.")
        );
        assert_eq!(extract_error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(r#"{"error":{}}"#), None);
    }

    #[test]
    fn test_invalid_credential_detection() {
        assert!(is_invalid_credential_message("API key not found. Please pass a valid API key."));
        assert!(is_invalid_credential_message("API Key not valid"));
        assert!(is_invalid_credential_message("Please check your API key and try again"));
        assert!(!is_invalid_credential_message("Invalid JSON payload received."));
    }
}

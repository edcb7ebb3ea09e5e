use super::request_executor::{build_method_url, build_model_url, redact_url};

#[test]
fn test_build_method_url() {
    let base_url = "https://generativelanguage.googleapis.com/v1beta";

    let url = build_method_url(base_url, "gemini-2.5-flash", "generateContent", "AIzaKey").unwrap();
    assert_eq!(
        url.as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=AIzaKey"
    );
}

#[test]
fn test_build_model_url() {
    let url = build_model_url("http://127.0.0.1:9999/v1beta", "gemini-2.0-flash", "k").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9999/v1beta/models/gemini-2.0-flash?key=k");
}

#[test]
fn test_invalid_base_url() {
    assert!(build_model_url("not a url", "m", "k").is_err());
}

#[test]
fn test_redact_url_hides_key() {
    let url = build_method_url("https://x.test/v1beta", "m", "generateContent", "AIzaSyVerySecret99")
        .unwrap();
    let redacted = redact_url(&url);
    assert!(!redacted.contains("VerySecret"));
    assert!(redacted.contains("AIza"));
}

#[tokio::test]
async fn test_blank_credential_skips_request() {
    let client = super::GeminiClient::with_client(reqwest::Client::new(), "http://127.0.0.1:1/v1beta");
    let check = client.validate_credential("m", "   ").await;
    assert!(!check.valid);
    assert_eq!(check.error.as_deref(), Some("API key is required"));
}

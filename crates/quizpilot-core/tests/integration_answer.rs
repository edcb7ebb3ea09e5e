#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test: panics are the assertion mechanism")]

use std::sync::Arc;
use std::time::Duration;

use quizpilot_core::{
    CancellationToken, CredentialStore, FileCredentialStore, GeminiClient, ManualRotator,
    NoopReporter, QuestionProcessor, RequestExecutor,
};
use quizpilot_types::{Answer, AppConfig, QuestionType, QuestionRecord};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn answer_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }]
    })
}

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_client(reqwest::Client::new(), &format!("{}/v1beta", server.uri()))
}

#[tokio::test]
async fn test_validate_credential_statuses() {
    let server = MockServer::start().await;
    let client = client(&server);

    {
        let _guard = Mock::given(method("GET"))
            .and(path("/v1beta/models/gemini-2.5-flash"))
            .and(query_param("key", "AIzaGood"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "models/gemini-2.5-flash"})))
            .expect(1)
            .mount_as_scoped(&server)
            .await;

        let check = client.validate_credential("gemini-2.5-flash", "AIzaGood").await;
        assert!(check.valid, "200 scenario: {:?}", check.error);
    }

    {
        let _guard = Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid. Please pass a valid API key."}
            })))
            .mount_as_scoped(&server)
            .await;

        let check = client.validate_credential("gemini-2.5-flash", "AIzaBad").await;
        assert!(!check.valid);
        assert_eq!(check.error.as_deref(), Some("API key not valid. Please pass a valid API key."));
    }

    {
        let _guard = Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount_as_scoped(&server)
            .await;

        let check = client.validate_credential("gemini-2.5-flash", "AIzaBad").await;
        assert_eq!(check.error.as_deref(), Some("API key is invalid or doesn't have permission"));
    }

    {
        let _guard = Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount_as_scoped(&server)
            .await;

        let check = client.validate_credential("gemini-2.5-flash", "AIzaBad").await;
        assert_eq!(check.error.as_deref(), Some("Validation failed with status 502"));
    }

    let blank = client.validate_credential("gemini-2.5-flash", "   ").await;
    assert_eq!(blank.error.as_deref(), Some("API key is required"));
}

#[tokio::test]
async fn test_dead_key_rotated_manually_and_persisted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("key", "AIzaDeadKey"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 400, "message": "API key not found. Please pass a valid API key."}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(query_param("key", "AIzaFreshKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body(
            "```json\n{\"answer\": [\"Mercury\", \"Venus\"], \"explanation\": \"Inner planets.\"}\n```",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let data_dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FileCredentialStore::new(data_dir.path()));
    store.set("AIzaDeadKey").await.expect("seed credential");

    let mut config = AppConfig::default();
    config.rotation.poll_interval_ms = 20;
    config.rotation.max_polls = 250;
    let rotator = Arc::new(ManualRotator::new(&config.rotation));
    let executor =
        RequestExecutor::new(client(&server), &config, store.clone(), rotator.clone())
            .expect("executor");
    let processor = Arc::new(QuestionProcessor::new(Arc::new(executor)));

    let record = QuestionRecord::new(QuestionType::MultipleSelect, "Which planets are closer than Earth?")
        .with_options(["Mercury", "Venus", "Mars"]);
    let task = {
        let processor = processor.clone();
        tokio::spawn(async move {
            processor.process(&record, &NoopReporter, &CancellationToken::new()).await
        })
    };

    let mut waited = Duration::ZERO;
    while !rotator.is_pending() {
        assert!(waited < Duration::from_secs(5), "rotation never started");
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += Duration::from_millis(10);
    }
    assert!(rotator.supply("AIzaFreshKey"));

    let result = task.await.expect("join").expect("answered");
    assert_eq!(
        result.answer,
        Answer::Multiple(vec!["Mercury".to_string(), "Venus".to_string()])
    );
    assert_eq!(result.explanation, "Inner planets.");

    let reopened = FileCredentialStore::new(data_dir.path());
    assert_eq!(reopened.get().await.expect("read").as_deref(), Some("AIzaFreshKey"));
}

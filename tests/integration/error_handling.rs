//! Integration tests for transport errors and opt-in retry

use crate::integration::mock_server::{MockServerFixture, GEMINI_PATH, OPENAI_PATH};
use lingualeap::flows::grammar::{grammar_and_spelling_check, GrammarCheckInput};
use lingualeap::transport::TransportError;
use lingualeap::{Error, Provider, RetryConfig};

fn input() -> GrammarCheckInput {
    GrammarCheckInput {
        text: "I has a apple.".into(),
    }
}

fn fast_retries(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        min_delay_ms: 1,
        max_delay_ms: 5,
    }
}

#[tokio::test]
async fn test_server_error_fails_without_retry_by_default() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(GEMINI_PATH, 500, r#"{"error":{"message":"Internal error"}}"#, 1)
        .await;

    let client = fixture
        .create_test_client(Provider::Gemini, RetryConfig::default())
        .unwrap();
    let err = grammar_and_spelling_check(&client, &input()).await.unwrap_err();

    match &err {
        Error::Transport(TransportError::Status { status, body }) => {
            assert_eq!(*status, 500);
            assert!(body.contains("Internal error"));
        }
        other => panic!("expected transport status error, got {other:?}"),
    }
    assert!(err.is_retryable());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_retry_on_transient_error() {
    let fixture = MockServerFixture::new().await;
    let failing = fixture
        .mock_json_response(OPENAI_PATH, 503, r#"{"error":{"message":"overloaded"}}"#, 1)
        .await;
    let succeeding = fixture
        .mock_json_response(
            OPENAI_PATH,
            200,
            &MockServerFixture::openai_body(serde_json::json!(r#"{"correctedText": "I have an apple."}"#)),
            1,
        )
        .await;

    let client = fixture
        .create_test_client(Provider::OpenAi, fast_retries(2))
        .unwrap();
    let out = grammar_and_spelling_check(&client, &input()).await.unwrap();

    assert_eq!(out.corrected_text, "I have an apple.");
    failing.assert_async().await;
    succeeding.assert_async().await;
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(OPENAI_PATH, 400, r#"{"error":{"message":"bad request"}}"#, 1)
        .await;

    let client = fixture
        .create_test_client(Provider::OpenAi, fast_retries(3))
        .unwrap();
    let err = grammar_and_spelling_check(&client, &input()).await.unwrap_err();

    assert!(err.is_transport());
    assert!(!err.is_retryable());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_retries_exhausted() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(OPENAI_PATH, 429, r#"{"error":{"message":"slow down"}}"#, 3)
        .await;

    let client = fixture
        .create_test_client(Provider::OpenAi, fast_retries(2))
        .unwrap();
    let err = grammar_and_spelling_check(&client, &input()).await.unwrap_err();

    assert_eq!(
        match err {
            Error::Transport(ref t) => t.status(),
            _ => None,
        },
        Some(429)
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response(GEMINI_PATH, 200, "<html>gateway</html>", 1)
        .await;

    let client = fixture
        .create_test_client(Provider::Gemini, RetryConfig::default())
        .unwrap();
    let err = grammar_and_spelling_check(&client, &input()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::InvalidBody(_))));
}

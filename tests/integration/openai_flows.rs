//! Flows end to end against a mocked OpenAI-compatible endpoint

use crate::integration::mock_server::{MockServerFixture, OPENAI_PATH};
use lingualeap::flows::enhance::{enhance_sentence, EnhanceSentenceInput};
use lingualeap::flows::grammar::{grammar_and_spelling_check, GrammarCheckInput};
use lingualeap::{Error, Provider, RetryConfig};
use mockito::Matcher;
use serde_json::{json, Value};

#[tokio::test]
async fn test_enhance_sentence_sends_strict_schema() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", OPENAI_PATH)
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-test",
                "stream": false,
                "response_format": {
                    "type": "json_schema",
                    "json_schema": {"name": "EnhanceSentenceOutput", "strict": true}
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(MockServerFixture::openai_body(json!(
                r#"{"enhancedSentence": "The weather was delightful.", "explanation": "More precise adjective."}"#
            )))
            .create_async()
            .await
    };

    let client = fixture
        .create_test_client(Provider::OpenAi, RetryConfig::default())
        .unwrap();
    let out = enhance_sentence(
        &client,
        &EnhanceSentenceInput {
            sentence: "The weather was good".into(),
        },
    )
    .await
    .unwrap();

    assert_eq!(out.enhanced_sentence, "The weather was delightful.");
    assert_eq!(out.explanation, "More precise adjective.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_field_in_reply_is_schema_violation() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_openai(200, &MockServerFixture::openai_body(json!(r#"{"text": "fixed"}"#)))
        .await;

    let client = fixture
        .create_test_client(Provider::OpenAi, RetryConfig::default())
        .unwrap();
    let err = grammar_and_spelling_check(&client, &GrammarCheckInput { text: "teh".into() })
        .await
        .unwrap_err();

    match err {
        Error::SchemaViolation { flow, errors, .. } => {
            assert_eq!(flow, "grammarAndSpellingCheckFlow");
            assert!(errors
                .iter()
                .any(|e| e.message == "Missing required property: correctedText"));
        }
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_null_content_is_missing_output() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_openai(200, &MockServerFixture::openai_body(Value::Null))
        .await;

    let client = fixture
        .create_test_client(Provider::OpenAi, RetryConfig::default())
        .unwrap();
    let err = grammar_and_spelling_check(&client, &GrammarCheckInput { text: "teh".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ModelOutputMissing { .. }));
}

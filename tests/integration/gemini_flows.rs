//! Flows end to end against a mocked Gemini endpoint

use crate::integration::mock_server::{MockServerFixture, API_KEY, GEMINI_PATH};
use lingualeap::flows::clarity::{analyze_clarity_and_coherence, ClarityFeedbackInput};
use lingualeap::flows::enhance::enhance_text;
use lingualeap::flows::grammar::{grammar_and_spelling_check, GrammarCheckInput};
use lingualeap::{Error, Provider, RetryConfig};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_grammar_flow_returns_corrected_text() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", GEMINI_PATH)
            .match_query(Matcher::UrlEncoded("key".into(), API_KEY.into()))
            .match_header("x-lingualeap-request-id", Matcher::Regex("^[0-9a-f-]{36}$".into()))
            .match_body(Matcher::PartialJson(json!({
                "contents": [{
                    "role": "user",
                    "parts": [{"text": "You are an AI expert in grammar and spelling.\n\nYou will be given a text, and you will return the text corrected for grammar and spelling errors.\n\nText: She go to school yesterday.\n"}]
                }],
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(MockServerFixture::gemini_body(
                r#"{"correctedText": "She went to school yesterday."}"#,
            ))
            .create_async()
            .await
    };

    let client = fixture
        .create_test_client(Provider::Gemini, RetryConfig::default())
        .unwrap();
    let out = grammar_and_spelling_check(
        &client,
        &GrammarCheckInput {
            text: "She go to school yesterday.".into(),
        },
    )
    .await
    .unwrap();

    assert_eq!(out.corrected_text, "She went to school yesterday.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_clarity_flow_accepts_fenced_json() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_gemini(
            200,
            &MockServerFixture::gemini_body(
                "```json\n{\"feedback\": \"Join the two short sentences.\"}\n```",
            ),
        )
        .await;

    let client = fixture
        .create_test_client(Provider::Gemini, RetryConfig::default())
        .unwrap();
    let out = analyze_clarity_and_coherence(
        &client,
        &ClarityFeedbackInput {
            text: "I like tea. It is hot.".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(out.feedback, "Join the two short sentences.");
}

#[tokio::test]
async fn test_enhance_text_calls_once_per_sentence() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(
            GEMINI_PATH,
            200,
            &MockServerFixture::gemini_body(
                r#"{"enhancedSentence": "The cat lounged lazily.", "explanation": "Vivid verb."}"#,
            ),
            3,
        )
        .await;

    let client = fixture
        .create_test_client(Provider::Gemini, RetryConfig::default())
        .unwrap();
    let results = enhance_text(&client, "The cat sat. It sat. It slept.").await.unwrap();

    assert_eq!(results.len(), 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blocked_prompt_is_missing_output() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_gemini(200, r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .await;

    let client = fixture
        .create_test_client(Provider::Gemini, RetryConfig::default())
        .unwrap();
    let err = grammar_and_spelling_check(&client, &GrammarCheckInput { text: "x".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ModelOutputMissing { ref flow } if flow == "grammarAndSpellingCheckFlow"));
    assert!(err.is_schema_violation());
}

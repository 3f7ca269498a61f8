//! Mock HTTP server setup for integration tests

use lingualeap::{AiClient, Provider, RetryConfig};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const GEMINI_PATH: &str = "/v1beta/models/gemini-test:generateContent";
pub const OPENAI_PATH: &str = "/chat/completions";
pub const API_KEY: &str = "test-key";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Create a test client pointed at the mock server
    pub fn create_test_client(&self, provider: Provider, retry: RetryConfig) -> lingualeap::Result<AiClient> {
        let model = match provider {
            Provider::Gemini => "gemini-test",
            Provider::OpenAi => "gpt-test",
        };
        AiClient::builder()
            .provider(provider)
            .model(model)
            .api_key(API_KEY)
            .retry(retry)
            .base_url_override(&self.base_url)
            .build()
    }

    /// Gemini generateContent answer whose single text part is `text`
    pub fn gemini_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 40, "candidatesTokenCount": 9, "totalTokenCount": 49}
        })
        .to_string()
    }

    /// Chat completions answer whose message content is `content`
    pub fn openai_body(content: Value) -> String {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 40, "completion_tokens": 9, "total_tokens": 49}
        })
        .to_string()
    }

    /// Create a mock for a Gemini JSON response; the API key must arrive as `?key=`
    pub async fn mock_gemini(&self, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", GEMINI_PATH)
            .match_query(Matcher::UrlEncoded("key".into(), API_KEY.into()))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Create a mock for a chat completions JSON response; the API key must arrive as a bearer token
    pub async fn mock_openai(&self, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", OPENAI_PATH)
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Create a mock that must be hit exactly `hits` times
    pub async fn mock_json_response(&self, path: &str, status: usize, body: &str, hits: usize) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }
}

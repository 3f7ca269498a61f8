//! Google Gemini generateContent API driver. Key differences from chat APIs:
//! - Uses `contents` with `parts`; the system turn goes in `system_instruction`.
//! - `generationConfig` wraps temperature, `maxOutputTokens` and the JSON
//!   output settings (`responseMimeType`, `responseSchema`).
//! - Response: `candidates[0].content.parts[*].text`.
//! - API key is passed as `?key=` query parameter, not in headers.

use serde_json::Value;
use std::collections::HashMap;

use crate::config::Provider;
use crate::types::{GenerateRequest, GenerateResponse, MessageRole, UsageInfo};
use crate::Result;

use super::{merge_object, DriverRequest, GenerationOptions, ModelDriver};

#[derive(Debug)]
pub struct GeminiDriver {
    api_key: Option<String>,
}

impl GeminiDriver {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn normalize_finish_reason(reason: &str) -> String {
        match reason {
            "STOP" => "stop".to_string(),
            "MAX_TOKENS" => "length".to_string(),
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
                "content_filter".to_string()
            }
            other => other.to_lowercase(),
        }
    }
}

impl ModelDriver for GeminiDriver {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn build_request(&self, request: &GenerateRequest, options: &GenerationOptions) -> Result<DriverRequest> {
        let mut system_parts: Vec<Value> = Vec::new();
        let mut contents: Vec<Value> = Vec::new();
        for m in request.messages() {
            match m.role {
                MessageRole::System => system_parts.push(serde_json::json!({ "text": m.content })),
                MessageRole::User => contents.push(serde_json::json!({
                    "role": "user",
                    "parts": [{ "text": m.content }],
                })),
            }
        }

        let mut body = serde_json::json!({ "contents": contents });
        if !system_parts.is_empty() {
            body["system_instruction"] = serde_json::json!({ "parts": system_parts });
        }

        let mut gen_config = serde_json::json!({});
        if let Some(t) = options.temperature {
            gen_config["temperature"] = serde_json::json!(t);
        }
        if let Some(mt) = options.max_output_tokens {
            gen_config["maxOutputTokens"] = serde_json::json!(mt);
        }
        merge_object(&mut gen_config, &request.output.to_gemini_format());
        body["generationConfig"] = gen_config;

        let mut query = Vec::new();
        if let Some(key) = &self.api_key {
            query.push(("key".to_string(), key.clone()));
        }

        Ok(DriverRequest {
            path: format!("/v1beta/models/{}:generateContent", options.model),
            headers: HashMap::new(),
            query,
            body,
        })
    }

    fn parse_response(&self, body: &Value) -> Result<GenerateResponse> {
        // { candidates: [{ content: { parts: [{text}] }, finishReason }], usageMetadata }
        let text = body
            .pointer("/candidates/0/content/parts")
            .and_then(|p| p.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                    .collect::<String>()
            })
            .filter(|t| !t.trim().is_empty());

        let finish_reason = body
            .pointer("/candidates/0/finishReason")
            .and_then(|v| v.as_str())
            .map(Self::normalize_finish_reason)
            .or_else(|| {
                // Prompt blocked before generation: no candidates at all.
                body.pointer("/promptFeedback/blockReason")
                    .and_then(|v| v.as_str())
                    .map(|_| "content_filter".to_string())
            });

        let usage = body.get("usageMetadata").map(|u| UsageInfo {
            prompt_tokens: u["promptTokenCount"].as_u64().unwrap_or(0),
            completion_tokens: u["candidatesTokenCount"].as_u64().unwrap_or(0),
            total_tokens: u["totalTokenCount"].as_u64().unwrap_or(0),
        });

        Ok(GenerateResponse {
            text,
            finish_reason,
            usage,
        })
    }
}

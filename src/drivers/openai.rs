//! OpenAI-compatible chat completions driver (OpenAI, DeepSeek, local gateways, ...).

use serde_json::Value;
use std::collections::HashMap;

use crate::config::Provider;
use crate::types::{GenerateRequest, GenerateResponse, UsageInfo};
use crate::Result;

use super::{merge_object, DriverRequest, GenerationOptions, ModelDriver};

#[derive(Debug)]
pub struct OpenAiDriver {
    api_key: Option<String>,
}

impl OpenAiDriver {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

impl ModelDriver for OpenAiDriver {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn build_request(&self, request: &GenerateRequest, options: &GenerationOptions) -> Result<DriverRequest> {
        let messages = serde_json::to_value(request.messages())?;

        let mut body = serde_json::json!({
            "model": options.model,
            "messages": messages,
            "stream": false,
        });
        if let Some(t) = options.temperature {
            body["temperature"] = serde_json::json!(t);
        }
        if let Some(mt) = options.max_output_tokens {
            body["max_tokens"] = serde_json::json!(mt);
        }
        merge_object(&mut body, &request.output.to_openai_format());

        let mut headers = HashMap::new();
        if let Some(key) = &self.api_key {
            headers.insert("authorization".to_string(), format!("Bearer {}", key));
        }

        Ok(DriverRequest {
            path: "/chat/completions".to_string(),
            headers,
            query: Vec::new(),
            body,
        })
    }

    fn parse_response(&self, body: &Value) -> Result<GenerateResponse> {
        let text = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(String::from);
        let finish_reason = body
            .pointer("/choices/0/finish_reason")
            .and_then(|v| v.as_str())
            .map(String::from);
        let usage = body.get("usage").map(|u| UsageInfo {
            prompt_tokens: u["prompt_tokens"].as_u64().unwrap_or(0),
            completion_tokens: u["completion_tokens"].as_u64().unwrap_or(0),
            total_tokens: u["total_tokens"].as_u64().unwrap_or(0),
        });

        Ok(GenerateResponse {
            text,
            finish_reason,
            usage,
        })
    }
}

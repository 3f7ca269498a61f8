//! Provider drivers: turn a [`GenerateRequest`] into a provider HTTP call and
//! the provider's JSON back into a [`GenerateResponse`].
//!
//! Drivers are pure translation. They do no I/O; the client owns the transport.

pub mod gemini;
pub mod openai;

use serde_json::Value;
use std::collections::HashMap;

use crate::config::Provider;
use crate::types::{GenerateRequest, GenerateResponse};
use crate::Result;

pub use gemini::GeminiDriver;
pub use openai::OpenAiDriver;

/// Provider-specific HTTP request, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct DriverRequest {
    pub path: String,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Value,
}

/// Sampling knobs shared by every driver.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
}

/// Contract between the client and one provider API style.
pub trait ModelDriver: Send + Sync + std::fmt::Debug {
    fn provider(&self) -> Provider;

    fn build_request(&self, request: &GenerateRequest, options: &GenerationOptions) -> Result<DriverRequest>;

    fn parse_response(&self, body: &Value) -> Result<GenerateResponse>;
}

pub fn create_driver(provider: Provider, api_key: Option<String>) -> Box<dyn ModelDriver> {
    match provider {
        Provider::Gemini => Box::new(GeminiDriver::new(api_key)),
        Provider::OpenAi => Box::new(OpenAiDriver::new(api_key)),
    }
}

/// Merge `extra`'s top-level keys into `target` when both are objects.
pub(crate) fn merge_object(target: &mut Value, extra: &Value) {
    if let (Value::Object(dst), Value::Object(src)) = (target, extra) {
        for (k, v) in src {
            dst.insert(k.clone(), v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_driver_matches_provider() {
        assert_eq!(create_driver(Provider::Gemini, None).provider(), Provider::Gemini);
        assert_eq!(create_driver(Provider::OpenAi, None).provider(), Provider::OpenAi);
    }

    #[test]
    fn test_merge_object() {
        let mut a = serde_json::json!({"temperature": 0.2});
        merge_object(&mut a, &serde_json::json!({"responseMimeType": "application/json"}));
        assert_eq!(a["temperature"], 0.2);
        assert_eq!(a["responseMimeType"], "application/json");
    }
}

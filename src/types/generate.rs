//! One prompt-in, structured-text-out exchange with a generative model.

use crate::structured::JsonModeConfig;
use crate::types::message::Message;

/// Everything a driver needs to ask for one structured answer.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Flow name, for logs and error reports.
    pub flow: String,
    /// Correlation id for this invocation.
    pub request_id: String,
    /// Rendered prompt, sent verbatim as the user turn.
    pub prompt: String,
    /// Expected answer shape.
    pub output: JsonModeConfig,
}

impl GenerateRequest {
    pub fn new(flow: impl Into<String>, prompt: impl Into<String>, output: JsonModeConfig) -> Self {
        Self {
            flow: flow.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            output,
        }
    }

    /// System instruction followed by the user prompt.
    pub fn messages(&self) -> Vec<Message> {
        vec![
            Message::system(self.output.format_instruction()),
            Message::user(self.prompt.clone()),
        ]
    }
}

/// Model answer before schema enforcement.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// Text of the first candidate. `None` when the model produced nothing.
    pub text: Option<String>,
    /// Normalized finish reason (`stop`, `length`, `content_filter`, ...).
    pub finish_reason: Option<String>,
    pub usage: Option<UsageInfo>,
}

impl GenerateResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageInfo {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    #[test]
    fn test_messages_order_and_ids() {
        let output = JsonModeConfig::from_schema(serde_json::json!({"type": "object"}), "out", true);
        let a = GenerateRequest::new("flow", "Text: hi", output.clone());
        let b = GenerateRequest::new("flow", "Text: hi", output);
        assert_ne!(a.request_id, b.request_id);

        let msgs = a.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, MessageRole::System);
        assert_eq!(msgs[1], Message::user("Text: hi"));
    }
}

//! Writing-assistant flows.
//!
//! A flow is one request/response unit of work: validate the request against
//! its input schema, render a fixed prompt, ask the model for an answer in a
//! declared output shape, and hand back only a value that satisfies that shape.
//!
//! | Flow | Request | Response |
//! |------|---------|----------|
//! | [`grammar::GrammarAndSpellingCheck`] | `text` | `correctedText` |
//! | [`clarity::ClarityAndCoherence`] | `text` | `feedback` |
//! | [`enhance::EnhanceSentence`] | `sentence` | `enhancedSentence`, `explanation` |
//!
//! The model handle is always passed in by the caller:
//!
//! ```rust,no_run
//! use lingualeap::flows::grammar::{grammar_and_spelling_check, GrammarCheckInput};
//! use lingualeap::AiClient;
//!
//! # async fn demo() -> lingualeap::Result<()> {
//! let client = AiClient::from_env()?;
//! let out = grammar_and_spelling_check(
//!     &client,
//!     &GrammarCheckInput { text: "She go to school yesterday.".into() },
//! )
//! .await?;
//! println!("{}", out.corrected_text);
//! # Ok(())
//! # }
//! ```

pub mod clarity;
pub mod enhance;
pub mod grammar;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::client::GenerativeModel;
use crate::structured::{json_schema_for, JsonModeConfig, OutputValidator, StructuredOutput};
use crate::template::PromptTemplate;
use crate::types::GenerateRequest;
use crate::{Error, ErrorContext, Result};

/// Static description of one flow.
pub trait Flow {
    type Input: Serialize + DeserializeOwned + JsonSchema + Send + Sync;
    type Output: Serialize + DeserializeOwned + JsonSchema + Send;

    /// Flow name used in logs and errors.
    const NAME: &'static str;
    /// Name the output schema is registered under with the provider.
    const OUTPUT_NAME: &'static str;
    /// The prompt. Its wording is part of the flow's behavior.
    const TEMPLATE: PromptTemplate;
    const PROMPT_NAME: &'static str = Self::TEMPLATE.name;

    fn input_schema() -> Value {
        json_schema_for::<Self::Input>()
    }

    fn output_schema() -> Value {
        json_schema_for::<Self::Output>()
    }

    /// Rendered prompt plus the schema the answer must satisfy.
    fn render(input: &Self::Input) -> Result<(String, Value)> {
        let vars = validate_input::<Self>(serde_json::to_value(input)?)?;
        Ok((Self::TEMPLATE.render(&vars)?, Self::output_schema()))
    }
}

/// Check `value` against the flow's input schema.
pub fn validate_input<F: Flow + ?Sized>(value: Value) -> Result<Value> {
    let result = OutputValidator::lenient(F::input_schema()).validate(value);
    match result.into_result() {
        Ok(v) => Ok(v),
        Err(errors) => {
            let first_path = errors
                .iter()
                .find_map(|e| e.field())
                .map(|f| format!("input.{}", f));
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            let mut context = ErrorContext::new()
                .with_source("input_validator")
                .with_details(F::NAME);
            if let Some(path) = first_path {
                context = context.with_field_path(path);
            }
            Err(Error::validation_with_context(messages.join("; "), context))
        }
    }
}

/// Run flow `F` with a typed request.
pub async fn run_flow<F, M>(model: &M, input: &F::Input) -> Result<F::Output>
where
    F: Flow,
    M: GenerativeModel + ?Sized,
{
    let vars = validate_input::<F>(serde_json::to_value(input)?)?;
    invoke::<F, M>(model, vars).await
}

/// Run flow `F` with an untyped JSON request, e.g. one received from a UI.
///
/// Missing or mistyped fields fail with [`Error::Validation`] and the model
/// is never called.
pub async fn run_flow_json<F, M>(model: &M, input: Value) -> Result<F::Output>
where
    F: Flow,
    M: GenerativeModel + ?Sized,
{
    let vars = validate_input::<F>(input)?;
    // Round-trip through the typed request so serde-level rules apply too.
    let typed: F::Input = serde_json::from_value(vars).map_err(|e| {
        Error::validation_with_context(
            e.to_string(),
            ErrorContext::new().with_source("input_validator").with_details(F::NAME),
        )
    })?;
    run_flow::<F, M>(model, &typed).await
}

async fn invoke<F, M>(model: &M, vars: Value) -> Result<F::Output>
where
    F: Flow,
    M: GenerativeModel + ?Sized,
{
    let prompt = F::TEMPLATE.render(&vars)?;
    let schema = F::output_schema();
    let request = GenerateRequest::new(
        F::NAME,
        prompt,
        JsonModeConfig::from_schema(schema.clone(), F::OUTPUT_NAME, true),
    );
    let span = info_span!("flow", flow = F::NAME, request_id = %request.request_id);

    async move {
        debug!(prompt = F::PROMPT_NAME, prompt_chars = request.prompt.len(), "rendered prompt");
        let start = Instant::now();
        let response = model.generate(request).await?;

        let text = match response.text {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                warn!(finish_reason = response.finish_reason.as_deref().unwrap_or(""), "model returned no output");
                return Err(Error::ModelOutputMissing {
                    flow: F::NAME.to_string(),
                });
            }
        };

        let output = StructuredOutput::from_response(text, &OutputValidator::lenient(schema));
        let value = output.into_result().map_err(|errors| {
            warn!(errors = errors.len(), "model output failed schema validation");
            Error::schema_violation(F::NAME, "model output does not match the declared schema", errors)
        })?;

        let typed: F::Output = serde_json::from_value(value)
            .map_err(|e| Error::schema_violation(F::NAME, e.to_string(), Vec::new()))?;

        info!(elapsed_ms = start.elapsed().as_millis() as u64, "flow completed");
        Ok(typed)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-process model for flow tests.

    use super::*;
    use crate::types::GenerateResponse;
    use std::sync::Mutex;

    pub(crate) struct ScriptedModel {
        reply: Option<String>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn silent() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            Ok(GenerateResponse {
                text: self.reply.clone(),
                finish_reason: Some("stop".into()),
                usage: None,
            })
        }
    }
}

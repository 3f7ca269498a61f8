//! JSON output support: telling a provider what shape to answer in, and
//! pulling that shape back out of its reply.

use crate::structured::error::{ValidationError, ValidationResult};
use crate::structured::schema::{close_objects, to_gemini_schema};
use crate::structured::validator::OutputValidator;
use once_cell::sync::Lazy;
use regex::Regex;

/// Requested output shape for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonModeConfig {
    /// JSON schema the answer must satisfy
    pub schema: serde_json::Value,

    /// Name for the schema (used in OpenAI format)
    pub schema_name: String,

    /// Whether to ask the provider for strict schema compliance
    pub strict: bool,
}

impl JsonModeConfig {
    /// # Example
    ///
    /// ```
    /// use lingualeap::structured::JsonModeConfig;
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {"feedback": {"type": "string"}},
    ///     "required": ["feedback"]
    /// });
    /// let config = JsonModeConfig::from_schema(schema, "ClarityFeedbackOutput", true);
    /// let format = config.to_openai_format();
    /// assert_eq!(format["response_format"]["type"], "json_schema");
    /// ```
    pub fn from_schema(schema: serde_json::Value, name: impl Into<String>, strict: bool) -> Self {
        Self {
            schema,
            schema_name: name.into(),
            strict,
        }
    }

    /// `response_format` parameter for OpenAI-compatible chat completions.
    ///
    /// ```json
    /// {
    ///   "response_format": {
    ///     "type": "json_schema",
    ///     "json_schema": { "name": "...", "strict": true, "schema": { ... } }
    ///   }
    /// }
    /// ```
    pub fn to_openai_format(&self) -> serde_json::Value {
        let schema = if self.strict {
            close_objects(&self.schema)
        } else {
            self.schema.clone()
        };
        serde_json::json!({
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": self.schema_name,
                    "strict": self.strict,
                    "schema": schema
                }
            }
        })
    }

    /// Fields to merge into Gemini's `generationConfig`.
    pub fn to_gemini_format(&self) -> serde_json::Value {
        serde_json::json!({
            "responseMimeType": "application/json",
            "responseSchema": to_gemini_schema(&self.schema),
        })
    }

    /// Plain-language instruction restating the schema, sent as a system
    /// message so the rendered user prompt stays verbatim.
    pub fn format_instruction(&self) -> String {
        let pretty = serde_json::to_string_pretty(&self.schema).unwrap_or_else(|_| self.schema.to_string());
        format!(
            "Output should be in JSON format and conform to the following schema:\n\n```\n{}\n```",
            pretty
        )
    }
}

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("static regex"));
static FENCED_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```\s*([\s\S]*?)\s*```").expect("static regex"));
static BARE_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("static regex"));

/// Model reply parsed as JSON and checked against a schema.
#[derive(Debug, Clone)]
pub struct StructuredOutput {
    pub raw: String,
    /// None if no JSON could be found in `raw`
    pub parsed: Option<serde_json::Value>,
    pub validation_result: ValidationResult,
}

impl StructuredOutput {
    /// Parse `content` and validate it.
    ///
    /// A reply with no recoverable JSON is reported as a validation failure
    /// rather than passed through as a string.
    ///
    /// ```
    /// use lingualeap::structured::{OutputValidator, StructuredOutput};
    /// use serde_json::json;
    ///
    /// let validator = OutputValidator::lenient(json!({
    ///     "type": "object",
    ///     "properties": {"correctedText": {"type": "string"}},
    ///     "required": ["correctedText"]
    /// }));
    /// let output = StructuredOutput::from_response(
    ///     "```json\n{\"correctedText\": \"I went home.\"}\n```",
    ///     &validator,
    /// );
    /// assert!(output.is_valid());
    /// ```
    pub fn from_response(content: impl Into<String>, validator: &OutputValidator) -> Self {
        let raw = content.into();
        let parsed = Self::parse_json(raw.trim());
        let validation_result = match &parsed {
            Some(value) => validator.validate(value.clone()),
            None => ValidationResult::from_error(ValidationError::without_path(
                "Model output is not valid JSON",
            )),
        };
        Self {
            raw,
            parsed,
            validation_result,
        }
    }

    /// Extracts JSON from:
    /// - a raw JSON document
    /// - a ```json fenced block
    /// - any ``` fenced block
    /// - the outermost `{...}` span inside prose
    fn parse_json(text: &str) -> Option<serde_json::Value> {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(text) {
            return Some(parsed);
        }

        for re in [&*FENCED_JSON, &*FENCED_ANY, &*BARE_OBJECT] {
            if let Some(captures) = re.captures(text) {
                let candidate = match captures.get(1) {
                    Some(inner) => inner.as_str(),
                    None => captures.get(0).map(|c| c.as_str()).unwrap_or(text),
                };
                if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(candidate.trim()) {
                    return Some(parsed);
                }
            }
        }

        None
    }

    pub fn is_valid(&self) -> bool {
        self.validation_result.is_valid()
    }

    pub fn parsed(&self) -> Option<&serde_json::Value> {
        self.parsed.as_ref()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.validation_result.errors
    }

    pub fn into_result(self) -> Result<serde_json::Value, Vec<ValidationError>> {
        self.validation_result.into_result()
    }
}

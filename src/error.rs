use crate::structured::ValidationError;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path that caused the error (e.g., "input.text", "config.base_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "input_validator", "prompt_template")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for flow invocation.
///
/// Every failure of a flow call lands in exactly one of these categories and is
/// handed back to the caller; nothing is recovered locally.
#[derive(Debug, Error)]
pub enum Error {
    /// The request did not satisfy its input schema. Raised before any model call.
    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    /// The model answered, but not with a value matching the output schema.
    #[error("Schema violation in {flow}: {message}{}", format_errors(.errors))]
    SchemaViolation {
        flow: String,
        message: String,
        errors: Vec<ValidationError>,
    },

    /// The model returned no content at all.
    #[error("Model returned no output for {flow}")]
    ModelOutputMissing { flow: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        format!(" [{}]", joined.join("; "))
    }
}

impl Error {
    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn schema_violation(
        flow: impl Into<String>,
        msg: impl Into<String>,
        errors: Vec<ValidationError>,
    ) -> Self {
        Error::SchemaViolation {
            flow: flow.into(),
            message: msg.into(),
            errors,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// True for both malformed output and missing output.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Error::SchemaViolation { .. } | Error::ModelOutputMissing { .. }
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Whether a retry could plausibly succeed. Only consulted when a retry
    /// policy is configured.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(t) => t.is_transient(),
            _ => false,
        }
    }
}

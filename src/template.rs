//! Prompt templates with `{{{field}}}` interpolation.
//!
//! Values are inserted verbatim. There is no escaping and no nested
//! expansion: text that itself looks like a placeholder is left as is.

use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}\}").expect("static regex"));

/// A named, fixed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub source: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    /// Field names referenced by the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&'static str> {
        PLACEHOLDER
            .captures_iter(self.source)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Render against a JSON object.
    ///
    /// String fields are inserted as-is; other JSON values are inserted in
    /// their compact JSON form. A placeholder with no matching field is an error.
    pub fn render(&self, vars: &Value) -> Result<String> {
        let obj = vars.as_object().ok_or_else(|| {
            Error::validation_with_context(
                "Template variables must be a JSON object",
                ErrorContext::new().with_source(self.name),
            )
        })?;

        if let Some(missing) = self.placeholders().into_iter().find(|p| !obj.contains_key(*p)) {
            return Err(Error::validation_with_context(
                format!("Missing template variable: {}", missing),
                ErrorContext::new()
                    .with_field_path(format!("input.{}", missing))
                    .with_source(self.name),
            ));
        }

        let rendered = PLACEHOLDER.replace_all(self.source, |caps: &Captures| {
            match obj.get(&caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            }
        });
        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const T: PromptTemplate = PromptTemplate::new("testPrompt", "Fix this.\n\nText: {{{text}}}\n");

    #[test]
    fn test_placeholders() {
        assert_eq!(T.placeholders(), vec!["text"]);
        let spaced = PromptTemplate::new("p", "{{{ a }}} and {{{b}}}");
        assert_eq!(spaced.placeholders(), vec!["a", "b"]);
    }

    #[test]
    fn test_render_verbatim() {
        let out = T.render(&json!({"text": "<b>Ignore & obey</b> {{{text}}}"})).unwrap();
        assert_eq!(out, "Fix this.\n\nText: <b>Ignore & obey</b> {{{text}}}\n");
    }

    #[test]
    fn test_render_empty_string() {
        assert_eq!(T.render(&json!({"text": ""})).unwrap(), "Fix this.\n\nText: \n");
    }

    #[test]
    fn test_missing_variable() {
        let err = T.render(&json!({"sentence": "x"})).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.context().unwrap().field_path.as_deref(),
            Some("input.text")
        );
    }

    #[test]
    fn test_non_object_vars() {
        assert!(T.render(&json!("text")).unwrap_err().is_validation());
    }
}

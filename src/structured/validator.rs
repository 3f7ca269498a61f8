//! Schema validator used at both boundaries of a flow.
//!
//! Supports the subset of JSON Schema that flow contracts are declared with:
//! - `type` (single name or list of names)
//! - string constraints (`minLength`, `maxLength`, `pattern`)
//! - objects (`required`, `properties`, `additionalProperties`)
//! - arrays (`items`)
//! - `enum`

use crate::structured::error::{ValidationError, ValidationResult};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

/// Validates JSON values against a JSON schema.
#[derive(Debug, Clone)]
pub struct OutputValidator {
    schema: Value,
    /// Reject properties not declared in the schema unless the schema says otherwise.
    strict: bool,
}

impl OutputValidator {
    pub fn new(schema: Value, strict: bool) -> Self {
        Self { schema, strict }
    }

    pub fn strict(schema: Value) -> Self {
        Self::new(schema, true)
    }

    /// Undeclared properties are ignored.
    pub fn lenient(schema: Value) -> Self {
        Self::new(schema, false)
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn validate(&self, data: Value) -> ValidationResult {
        let mut errors = Vec::new();
        self.validate_at(&data, &self.schema, "", &mut errors);
        if errors.is_empty() {
            ValidationResult::success(data)
        } else {
            ValidationResult::failure(errors)
        }
    }

    fn validate_at(&self, data: &Value, schema: &Value, path: &str, errors: &mut Vec<ValidationError>) {
        if let Some(expected) = schema.get("type") {
            if let Err(e) = Self::validate_type(data, expected, path) {
                errors.push(e);
                return;
            }
        }

        match data {
            Value::String(s) => Self::validate_string(s, schema, path, errors),
            Value::Array(items) => {
                if let Some(items_schema) = schema.get("items") {
                    for (i, item) in items.iter().enumerate() {
                        self.validate_at(item, items_schema, &format!("{}[{}]", path, i), errors);
                    }
                }
            }
            Value::Object(_) => self.validate_object(data, schema, path, errors),
            _ => {}
        }

        if let Some(allowed) = schema.get("enum").and_then(|e| e.as_array()) {
            if !allowed.contains(data) {
                let names: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
                errors.push(ValidationError::with_path(
                    format!("Value not in allowed enum values: {}", names.join(", ")),
                    path.to_string(),
                ));
            }
        }
    }

    fn type_matches(data: &Value, type_name: &str) -> bool {
        match type_name {
            "string" => data.is_string(),
            "integer" => data.is_i64() || data.is_u64(),
            "number" => data.is_number(),
            "boolean" => data.is_boolean(),
            "array" => data.is_array(),
            "object" => data.is_object(),
            "null" => data.is_null(),
            _ => true,
        }
    }

    fn validate_type(data: &Value, expected: &Value, path: &str) -> Result<(), ValidationError> {
        let names: Vec<&str> = match expected {
            Value::String(s) => vec![s.as_str()],
            Value::Array(list) => list.iter().filter_map(|v| v.as_str()).collect(),
            _ => return Ok(()),
        };
        if names.is_empty() || names.iter().any(|n| Self::type_matches(data, n)) {
            return Ok(());
        }

        let actual = match data {
            Value::String(_) => "string",
            Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Null => "null",
        };
        Err(ValidationError::with_path(
            format!("Expected type '{}', got '{}'", names.join("|"), actual),
            path.to_string(),
        ))
    }

    fn validate_string(s: &str, schema: &Value, path: &str, errors: &mut Vec<ValidationError>) {
        let len = s.chars().count();
        if let Some(min) = schema.get("minLength").and_then(|m| m.as_u64()) {
            if len < min as usize {
                errors.push(ValidationError::with_path(
                    format!("String too short (minimum {} characters)", min),
                    path.to_string(),
                ));
            }
        }
        if let Some(max) = schema.get("maxLength").and_then(|m| m.as_u64()) {
            if len > max as usize {
                errors.push(ValidationError::with_path(
                    format!("String too long (maximum {} characters)", max),
                    path.to_string(),
                ));
            }
        }
        if let Some(pattern) = schema.get("pattern").and_then(|p| p.as_str()) {
            // An unparseable pattern is a schema bug, not a data error.
            if let Ok(re) = Regex::new(pattern) {
                if !re.is_match(s) {
                    errors.push(ValidationError::with_path(
                        "String does not match required pattern",
                        path.to_string(),
                    ));
                }
            }
        }
    }

    fn validate_object(&self, data: &Value, schema: &Value, path: &str, errors: &mut Vec<ValidationError>) {
        let obj = match data.as_object() {
            Some(o) => o,
            None => return,
        };

        if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
            for name in required.iter().filter_map(|v| v.as_str()) {
                if !obj.contains_key(name) {
                    errors.push(ValidationError::with_path(
                        format!("Missing required property: {}", name),
                        format!("{}.{}", path, name),
                    ));
                }
            }
        }

        let properties = schema.get("properties").and_then(|p| p.as_object());
        if let Some(props) = properties {
            for (name, prop_schema) in props {
                if let Some(value) = obj.get(name) {
                    self.validate_at(value, prop_schema, &format!("{}.{}", path, name), errors);
                }
            }
        }

        let allow_extra = schema
            .get("additionalProperties")
            .and_then(|a| a.as_bool())
            .unwrap_or(!self.strict);
        if !allow_extra {
            let declared: HashSet<&str> = properties
                .map(|p| p.keys().map(|k| k.as_str()).collect())
                .unwrap_or_default();
            for key in obj.keys() {
                if !declared.contains(key.as_str()) {
                    errors.push(ValidationError::with_path(
                        format!("Additional property not allowed: {}", key),
                        format!("{}.{}", path, key),
                    ));
                }
            }
        }
    }
}

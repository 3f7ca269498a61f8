//! Schema generation utilities.

use serde_json::{json, Map, Value};

/// JSON schema for `T`, derived with schemars.
///
/// Doc comments on fields become `description`s. The `$schema` meta key and
/// the `title` are dropped since providers reject or ignore them.
pub fn json_schema_for<T: schemars::JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(&schema).unwrap_or_else(|_| json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
        if obj
            .get("definitions")
            .and_then(|d| d.as_object())
            .map(|d| d.is_empty())
            .unwrap_or(false)
        {
            obj.remove("definitions");
        }
    }
    value
}

/// Names listed under `required` at the top level of `schema`.
pub fn required_fields(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

/// Copy of `schema` with `additionalProperties: false` on every object.
///
/// OpenAI's strict structured-output mode refuses object schemas without it.
pub fn close_objects(schema: &Value) -> Value {
    match schema {
        Value::Object(obj) => {
            let mut out = Map::new();
            for (k, v) in obj {
                let v = match k.as_str() {
                    "properties" => match v.as_object() {
                        Some(props) => Value::Object(
                            props.iter().map(|(n, s)| (n.clone(), close_objects(s))).collect(),
                        ),
                        None => v.clone(),
                    },
                    "items" => close_objects(v),
                    _ => v.clone(),
                };
                out.insert(k.clone(), v);
            }
            if out.get("type").and_then(|t| t.as_str()) == Some("object") {
                out.insert("additionalProperties".into(), Value::Bool(false));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Convert a JSON schema into the OpenAPI subset Gemini accepts as `responseSchema`.
///
/// Type names are upper-cased and `["T", "null"]` becomes `T` + `nullable`.
/// Unsupported keywords are dropped.
pub fn to_gemini_schema(schema: &Value) -> Value {
    let obj = match schema.as_object() {
        Some(o) => o,
        None => return schema.clone(),
    };
    let mut out = Map::new();

    match obj.get("type") {
        Some(Value::String(t)) => {
            out.insert("type".into(), Value::String(t.to_uppercase()));
        }
        Some(Value::Array(types)) => {
            let names: Vec<&str> = types.iter().filter_map(|t| t.as_str()).collect();
            if let Some(t) = names.iter().find(|t| **t != "null") {
                out.insert("type".into(), Value::String(t.to_uppercase()));
            }
            if names.contains(&"null") {
                out.insert("nullable".into(), Value::Bool(true));
            }
        }
        _ => {}
    }

    for key in ["description", "enum", "required", "format"] {
        if let Some(v) = obj.get(key) {
            out.insert(key.into(), v.clone());
        }
    }
    if let Some(props) = obj.get("properties").and_then(|p| p.as_object()) {
        let converted: Map<String, Value> = props
            .iter()
            .map(|(name, s)| (name.clone(), to_gemini_schema(s)))
            .collect();
        out.insert("properties".into(), Value::Object(converted));
    }
    if let Some(items) = obj.get("items") {
        out.insert("items".into(), to_gemini_schema(items));
    }

    Value::Object(out)
}

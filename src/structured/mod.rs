//! Schema declaration and validation for flow inputs and model outputs.
//!
//! - `OutputValidator`: validate a JSON value against a JSON schema
//! - `StructuredOutput`: pull a JSON value out of raw model text and validate it
//! - `JsonModeConfig`: describe the expected output shape to a provider
//!
//! # Examples
//!
//! ```
//! use lingualeap::structured::OutputValidator;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"feedback": {"type": "string"}},
//!     "required": ["feedback"]
//! });
//!
//! let validator = OutputValidator::lenient(schema);
//! assert!(validator.validate(json!({"feedback": "Good flow."})).is_valid());
//! assert!(!validator.validate(json!({})).is_valid());
//! ```

pub mod error;
pub mod json_mode;
pub mod schema;
pub mod validator;

pub use error::{ValidationError, ValidationResult};
pub use json_mode::{JsonModeConfig, StructuredOutput};
pub use schema::json_schema_for;
pub use validator::OutputValidator;

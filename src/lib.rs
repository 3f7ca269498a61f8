//! # lingualeap
//!
//! Typed, schema-validated writing flows for English learners.
//!
//! ## Overview
//!
//! Each flow takes a small typed request, renders a fixed prompt, asks a
//! generative model for an answer in a declared JSON shape, and returns the
//! answer only once it has been validated against that shape. The model is
//! reached through one long-lived [`AiClient`] that the caller builds once and
//! passes into every call.
//!
//! ## Key Features
//!
//! - **Flows**: grammar/spelling correction, clarity feedback, sentence enhancement
//! - **Schema enforcement**: request and response schemas derived from the Rust types
//! - **Providers**: Gemini `generateContent` and OpenAI-compatible chat completions
//! - **Text helpers**: naive sentence splitting and correction highlighting
//! - **Reading**: CEFR-levelled practice passages
//! - **Speech**: collaborator interfaces and a placeholder pronunciation score
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lingualeap::flows::enhance::enhance_text;
//! use lingualeap::text::label;
//! use lingualeap::AiClient;
//!
//! #[tokio::main]
//! async fn main() -> lingualeap::Result<()> {
//!     let client = AiClient::builder().api_key("your-api-key").build()?;
//!
//!     let results = enhance_text(&client, "The cat sat. It was happy.").await?;
//!     for (i, r) in results.iter().enumerate() {
//!         println!("{}: {} ({})", label(i), r.enhanced_sentence, r.explanation);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`flows`] | The three writing flows and the shared invocation path |
//! | [`client`] | Model client, builder and retry policy |
//! | [`config`] | Client configuration (defaults, YAML, environment) |
//! | [`drivers`] | Provider request/response adapters |
//! | [`structured`] | Schema generation, JSON extraction and validation |
//! | [`template`] | `{{{field}}}` prompt templates |
//! | [`text`] | Sentence splitting and word highlighting |
//! | [`reading`] | Reading passages by CEFR level |
//! | [`speech`] | Audio/speech collaborator traits and placeholder scoring |

pub mod client;
pub mod config;
pub mod drivers;
pub mod flows;
pub mod reading;
pub mod speech;
pub mod structured;
pub mod template;
pub mod text;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{AiClient, AiClientBuilder, GenerativeModel, RetryPolicy};
pub use config::{ClientConfig, Provider, RetryConfig};
pub use flows::clarity::{analyze_clarity_and_coherence, ClarityFeedbackInput, ClarityFeedbackOutput};
pub use flows::enhance::{
    enhance_sentence, enhance_sentences, enhance_text, EnhanceSentenceInput, EnhanceSentenceOutput,
};
pub use flows::grammar::{grammar_and_spelling_check, GrammarCheckInput, GrammarCheckOutput};
pub use flows::{run_flow, run_flow_json, Flow};
pub use reading::{CefrLevel, Passage};
pub use types::{GenerateRequest, GenerateResponse, Message, MessageRole};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};

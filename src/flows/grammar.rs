//! Grammar and spelling check.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::GenerativeModel;
use crate::flows::{run_flow, Flow};
use crate::template::PromptTemplate;
use crate::Result;

pub const PROMPT: PromptTemplate = PromptTemplate::new(
    "grammarAndSpellingCheckPrompt",
    "You are an AI expert in grammar and spelling.\n\nYou will be given a text, and you will return the text corrected for grammar and spelling errors.\n\nText: {{{text}}}\n",
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrammarCheckInput {
    /// The text to check for grammar and spelling errors.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrammarCheckOutput {
    /// The text corrected for grammar and spelling errors.
    pub corrected_text: String,
}

pub struct GrammarAndSpellingCheck;

impl Flow for GrammarAndSpellingCheck {
    type Input = GrammarCheckInput;
    type Output = GrammarCheckOutput;

    const NAME: &'static str = "grammarAndSpellingCheckFlow";
    const OUTPUT_NAME: &'static str = "GrammarCheckOutput";
    const TEMPLATE: PromptTemplate = PROMPT;
}

/// Returns the text corrected for grammar and spelling.
///
/// Empty text is a valid request; what comes back is whatever the model
/// makes of it, as long as it has the declared shape.
pub async fn grammar_and_spelling_check<M>(model: &M, input: &GrammarCheckInput) -> Result<GrammarCheckOutput>
where
    M: GenerativeModel + ?Sized,
{
    run_flow::<GrammarAndSpellingCheck, M>(model, input).await
}

//! Clarity and coherence feedback.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::GenerativeModel;
use crate::flows::{run_flow, Flow};
use crate::template::PromptTemplate;
use crate::Result;

// Leading indentation is part of the prompt as shipped.
pub const PROMPT: PromptTemplate = PromptTemplate::new(
    "clarityAndCoherencePrompt",
    "You are an AI writing assistant that specializes in clarity and coherence.\n\n  Please provide feedback on the following text, focusing on how to improve its clarity and coherence. Suggest specific changes to improve the flow of ideas and ensure the text is easily understandable.\n\n  Text: {{{text}}}",
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClarityFeedbackInput {
    /// The text to analyze for clarity and coherence.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClarityFeedbackOutput {
    /// Feedback on the clarity and coherence of the text.
    pub feedback: String,
}

pub struct ClarityAndCoherence;

impl Flow for ClarityAndCoherence {
    type Input = ClarityFeedbackInput;
    type Output = ClarityFeedbackOutput;

    const NAME: &'static str = "clarityAndCoherenceFlow";
    const OUTPUT_NAME: &'static str = "ClarityFeedbackOutput";
    const TEMPLATE: PromptTemplate = PROMPT;
}

/// Free-form feedback on the clarity and flow of `input.text`.
pub async fn analyze_clarity_and_coherence<M>(
    model: &M,
    input: &ClarityFeedbackInput,
) -> Result<ClarityFeedbackOutput>
where
    M: GenerativeModel + ?Sized,
{
    run_flow::<ClarityAndCoherence, M>(model, input).await
}

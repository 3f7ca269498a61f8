//! Sentence enhancement, single and batched.

use futures::future::try_join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::GenerativeModel;
use crate::flows::{run_flow, Flow};
use crate::template::PromptTemplate;
use crate::text::segment::split_sentences;
use crate::Result;

pub const PROMPT: PromptTemplate = PromptTemplate::new(
    "enhanceSentencePrompt",
    "You are an AI English language coach specializing in sentence enhancement.\n\nYou will receive a sentence and your goal is to improve it by making suggestions for improving the sentence's structure and vocabulary to make it more engaging and polished.\n\nSentence: {{{sentence}}}\n\nRespond with the enhanced sentence and a short explanation of the changes you made.\n",
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceSentenceInput {
    /// The sentence to be enhanced.
    pub sentence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceSentenceOutput {
    /// The enhanced sentence with improved structure and vocabulary.
    pub enhanced_sentence: String,
    /// Explanation of the changes made to the sentence.
    pub explanation: String,
}

pub struct EnhanceSentence;

impl Flow for EnhanceSentence {
    type Input = EnhanceSentenceInput;
    type Output = EnhanceSentenceOutput;

    const NAME: &'static str = "enhanceSentenceFlow";
    const OUTPUT_NAME: &'static str = "EnhanceSentenceOutput";
    const TEMPLATE: PromptTemplate = PROMPT;
}

pub async fn enhance_sentence<M>(model: &M, input: &EnhanceSentenceInput) -> Result<EnhanceSentenceOutput>
where
    M: GenerativeModel + ?Sized,
{
    run_flow::<EnhanceSentence, M>(model, input).await
}

/// Enhance every sentence concurrently.
///
/// All calls are in flight at once. Results come back in input order no
/// matter which call finishes first, and the first failure fails the batch.
pub async fn enhance_sentences<M>(model: &M, sentences: Vec<String>) -> Result<Vec<EnhanceSentenceOutput>>
where
    M: GenerativeModel + ?Sized,
{
    debug!(count = sentences.len(), "enhancing sentences");
    let calls = sentences.into_iter().map(|sentence| async move {
        enhance_sentence(model, &EnhanceSentenceInput { sentence }).await
    });
    try_join_all(calls).await
}

/// Split `text` on periods and enhance each fragment.
///
/// Text without any non-blank fragment yields an empty list and no model calls.
pub async fn enhance_text<M>(model: &M, text: &str) -> Result<Vec<EnhanceSentenceOutput>>
where
    M: GenerativeModel + ?Sized,
{
    enhance_sentences(model, split_sentences(text)).await
}

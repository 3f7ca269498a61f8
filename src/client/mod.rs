//! Generative-model client.
//!
//! [`GenerativeModel`] is the seam flows are written against; [`AiClient`] is
//! the HTTP-backed implementation.

mod builder;
mod core;
mod policy;

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::{GenerateRequest, GenerateResponse};
use crate::Result;

pub use self::builder::AiClientBuilder;
pub use self::core::AiClient;
pub use self::policy::RetryPolicy;

/// Submit a prompt plus output schema, receive the model's raw answer.
///
/// Implementations do not validate the answer; that is the flow's job.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}

#[async_trait]
impl<T: GenerativeModel + ?Sized> GenerativeModel for Arc<T> {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        (**self).generate(request).await
    }
}

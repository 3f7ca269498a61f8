use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::client::policy::{Decision, RetryPolicy};
use crate::client::GenerativeModel;
use crate::config::{ClientConfig, Provider};
use crate::drivers::{GenerationOptions, ModelDriver};
use crate::transport::HttpTransport;
use crate::types::{GenerateRequest, GenerateResponse};
use crate::Result;

/// Long-lived handle to one generative-model endpoint.
///
/// Build it once at startup and pass a reference into every flow call.
/// It holds no per-call state, so concurrent calls share it freely.
pub struct AiClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) driver: Box<dyn ModelDriver>,
    pub(crate) options: GenerationOptions,
    pub(crate) policy: RetryPolicy,
}

impl AiClient {
    pub fn builder() -> crate::client::AiClientBuilder {
        crate::client::AiClientBuilder::new()
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        crate::client::AiClientBuilder::from_config(config).build()
    }

    /// Defaults overlaid with `LINGUALEAP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn provider(&self) -> Provider {
        self.driver.provider()
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Single attempt: build, send, parse.
    async fn generate_once(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let provider_request = self.driver.build_request(request, &self.options)?;
        let body = self
            .transport
            .post_json(
                &provider_request.path,
                &provider_request.headers,
                &provider_request.query,
                &provider_request.body,
                &request.request_id,
            )
            .await?;
        self.driver.parse_response(&body)
    }
}

#[async_trait]
impl GenerativeModel for AiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let start = Instant::now();
        let mut attempt = 0u32;
        loop {
            match self.generate_once(&request).await {
                Ok(resp) => {
                    debug!(
                        flow = %request.flow,
                        request_id = %request.request_id,
                        provider = %self.provider(),
                        model = %self.options.model,
                        attempts = attempt + 1,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        finish_reason = resp.finish_reason.as_deref().unwrap_or(""),
                        "model call completed"
                    );
                    return Ok(resp);
                }
                Err(e) => match self.policy.decide(&e, attempt) {
                    Decision::Retry { delay } => {
                        warn!(
                            flow = %request.flow,
                            request_id = %request.request_id,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "model call failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    Decision::Fail => return Err(e),
                },
            }
        }
    }
}

use crate::client::core::AiClient;
use crate::client::policy::RetryPolicy;
use crate::config::{ClientConfig, Provider, RetryConfig};
use crate::drivers::{create_driver, GenerationOptions};
use crate::transport::{resolve_api_key, HttpTransport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Builder for [`AiClient`].
///
/// Keep this surface area small and predictable.
pub struct AiClientBuilder {
    config: ClientConfig,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    /// Exact request timeout; takes precedence over `timeout_secs`.
    timeout: Option<Duration>,
}

impl AiClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            base_url_override: None,
            timeout: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
            base_url_override: None,
            timeout: None,
        }
    }

    pub fn provider(mut self, provider: Provider) -> Self {
        self.config.provider = provider;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Request timeout, kept at full precision. Zero is rejected by `build`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.config.max_output_tokens = Some(n);
        self
    }

    /// Enable retries on transient transport failures.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Override the endpoint base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<AiClient> {
        let mut config = self.config;
        if let Some(url) = self.base_url_override {
            config.base_url = Some(url);
        }
        config.validate()?;
        let timeout = match self.timeout {
            Some(t) if t.is_zero() => {
                return Err(Error::configuration_with_context(
                    "Timeout must be greater than zero",
                    ErrorContext::new().with_field_path("timeout"),
                ))
            }
            Some(t) => t,
            None => config.timeout(),
        };

        let provider = config.provider;
        let api_key = config
            .api_key
            .clone()
            .or_else(|| resolve_api_key(provider.id(), provider.api_key_env_vars()));
        if api_key.is_none() {
            warn!(provider = %provider, "no API key configured; requests will be unauthenticated");
        }

        let transport = Arc::new(HttpTransport::new(config.base_url(), timeout)?);
        let driver = create_driver(provider, api_key);
        let options = GenerationOptions {
            model: config.model().to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        };

        Ok(AiClient {
            transport,
            driver,
            options,
            policy: RetryPolicy::from(&config.retry),
        })
    }
}

impl Default for AiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Client configuration.
//!
//! Layering: built-in defaults, then an optional YAML file, then
//! `LINGUALEAP_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, ErrorContext, Result};

/// Which provider API style the client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    #[serde(alias = "openai-compatible")]
    OpenAi,
}

impl Provider {
    pub fn id(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.0-flash",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }

    /// Environment variables consulted for the API key, in order.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["LINGUALEAP_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Provider::OpenAi => &["LINGUALEAP_API_KEY", "OPENAI_API_KEY"],
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" | "googleai" => Ok(Provider::Gemini),
            "openai" | "openai-compatible" => Ok(Provider::OpenAi),
            other => Err(Error::configuration_with_context(
                format!("Unknown provider: {}", other),
                ErrorContext::new().with_field_path("provider"),
            )),
        }
    }
}

/// Opt-in retry hardening. `max_retries: 0` keeps the single-attempt contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            min_delay_ms: 250,
            max_delay_ms: 4_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub provider: Provider,
    /// Defaults to the provider's default model when unset.
    pub model: Option<String>,
    /// Defaults to the provider's public endpoint when unset.
    pub base_url: Option<String>,
    /// Falls back to keyring / environment lookup when unset.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            base_url: None,
            api_key: None,
            timeout_secs: 30,
            temperature: None,
            max_output_tokens: None,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid configuration: {}", e),
                ErrorContext::new().with_source("config_yaml"),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply `LINGUALEAP_*` overrides using `lookup` to read variables.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(p) = get("LINGUALEAP_PROVIDER") {
            self.provider = p.parse()?;
        }
        if let Some(m) = get("LINGUALEAP_MODEL") {
            self.model = Some(m);
        }
        if let Some(u) = get("LINGUALEAP_BASE_URL") {
            self.base_url = Some(u);
        }
        if let Some(t) = get("LINGUALEAP_TIMEOUT_SECS") {
            self.timeout_secs = parse_number(&t, "LINGUALEAP_TIMEOUT_SECS")?;
        }
        if let Some(r) = get("LINGUALEAP_MAX_RETRIES") {
            self.retry.max_retries = parse_number(&r, "LINGUALEAP_MAX_RETRIES")?;
        }
        Ok(())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base_url();
        let parsed = url::Url::parse(base).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base.to_string()),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "Base URL must use http or https",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base.to_string()),
            ));
        }
        if self.model().trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Model must not be empty",
                ErrorContext::new().with_field_path("model"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "Timeout must be at least one second",
                ErrorContext::new().with_field_path("timeout_secs"),
            ));
        }
        if self.retry.min_delay_ms > self.retry.max_delay_ms {
            return Err(Error::configuration_with_context(
                "retry.min_delay_ms exceeds retry.max_delay_ms",
                ErrorContext::new().with_field_path("retry"),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(raw: &str, name: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        Error::configuration_with_context(
            format!("{} must be a non-negative integer", name),
            ErrorContext::new().with_details(raw.to_string()),
        )
    })
}

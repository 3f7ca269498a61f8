use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use reqwest::Proxy;
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

/// Keyring service under which API keys may be stored.
const KEYRING_SERVICE: &str = "lingualeap";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy) = proxy_from(env::var("LINGUALEAP_PROXY_URL").ok())? {
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST a JSON body and decode the JSON answer.
    ///
    /// Any non-2xx status is returned as [`TransportError::Status`] with the
    /// response body attached.
    pub async fn post_json(
        &self,
        path: &str,
        headers: &HashMap<String, String>,
        query_params: &[(String, String)],
        body: &serde_json::Value,
        client_request_id: &str,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .post(&url)
            .json(body)
            .header("x-lingualeap-request-id", client_request_id);

        for (k, v) in headers {
            request = request.header(k, v);
        }
        if !query_params.is_empty() {
            request = request.query(query_params);
        }

        let response = request.send().await.map_err(TransportError::Http)?;
        let status = response.status();
        let text = response.text().await.map_err(TransportError::Http)?;
        debug!(
            http_status = status.as_u16(),
            bytes = text.len(),
            request_id = client_request_id,
            "model endpoint responded"
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        serde_json::from_str(&text)
            .map_err(|e| TransportError::InvalidBody(e.to_string()).into())
    }
}

/// Proxy for every request, from the `LINGUALEAP_PROXY_URL` value.
///
/// Unset or blank means no proxy; anything else must parse.
fn proxy_from(url: Option<String>) -> Result<Option<Proxy>> {
    let url = match url {
        Some(u) if !u.trim().is_empty() => u,
        _ => return Ok(None),
    };
    match Proxy::all(url.trim()) {
        Ok(proxy) => {
            debug!("using proxy from LINGUALEAP_PROXY_URL");
            Ok(Some(proxy))
        }
        Err(e) => {
            warn!(error = %e, "invalid LINGUALEAP_PROXY_URL");
            Err(Error::configuration_with_context(
                format!("Invalid proxy URL: {}", e),
                ErrorContext::new()
                    .with_field_path("LINGUALEAP_PROXY_URL")
                    .with_source("environment"),
            ))
        }
    }
}

/// Look up an API key for `provider_id`.
///
/// Order: OS keyring entry (`lingualeap` / provider), then the first set
/// environment variable among `env_vars`.
pub fn resolve_api_key(provider_id: &str, env_vars: &[&str]) -> Option<String> {
    if let Ok(entry) = Entry::new(KEYRING_SERVICE, provider_id) {
        if let Ok(key) = entry.get_password() {
            return Some(key);
        }
    }

    env_vars
        .iter()
        .find_map(|name| env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("endpoint returned a non-JSON body: {0}")]
    InvalidBody(String),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Timeouts, connection failures, throttling and server-side errors.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout() || e.is_connect(),
            TransportError::Status { status, .. } => {
                *status == 408 || *status == 429 || (500..=599).contains(status)
            }
            TransportError::InvalidBody(_) | TransportError::Other(_) => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

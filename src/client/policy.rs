use crate::config::RetryConfig;
use crate::Error;
use std::time::Duration;

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Retry policy for model calls.
///
/// The default performs no retries. When enabled, only transient transport
/// failures are retried; validation errors and schema violations never are,
/// since repeating the same call cannot fix them deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self::from(&RetryConfig::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        // exponential backoff: min_delay * 2^attempt
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let chosen = self.min_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(chosen)
    }

    /// `attempt` is 0-based (first failure => attempt=0).
    pub(crate) fn decide(&self, err: &Error, attempt: u32) -> Decision {
        if err.is_retryable() && attempt < self.max_retries {
            Decision::Retry {
                delay: self.backoff_delay(attempt),
            }
        } else {
            Decision::Fail
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            min_delay_ms: cfg.min_delay_ms,
            max_delay_ms: cfg.max_delay_ms.max(cfg.min_delay_ms),
        }
    }
}

//! Retry with exponential backoff for rate-limited provider calls
//!
//! Provider failures are classified once, by message text: anything that
//! mentions a quota or an HTTP 429 is treated as a rate-limit signal and
//! retried after `initial_delay * 2^attempt`. Every other failure ends the
//! call immediately as an internal error.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::config::RetryConfig;
use crate::error::{Error, Result};

/// Outcome of classifying a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Upstream signalled quota exhaustion or HTTP 429
    RateLimited,
    /// Anything else
    Internal,
}

/// Classify a failure message as rate-limit or internal
pub fn classify(message: &str) -> FailureKind {
    if message.to_lowercase().contains("quota") || message.contains("429") {
        FailureKind::RateLimited
    } else {
        FailureKind::Internal
    }
}

/// Backoff policy for provider calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; at least one attempt is always made
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            initial_delay,
        }
    }

    /// Build from configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_secs(config.initial_delay_secs),
        )
    }

    /// Total number of attempts
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before the retry that follows `attempt` (0-indexed)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(4))
    }
}

/// Run `operation` until it succeeds, fails with a non-rate-limit error, or
/// `max_retries` rate-limited attempts have been made.
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let max_retries = policy.max_retries();

    for attempt in 0..max_retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let message = e.to_string();
                if classify(&message) == FailureKind::Internal {
                    return Err(Error::Internal(message));
                }

                if attempt + 1 < max_retries {
                    let delay = policy.backoff_delay(attempt);
                    tracing::warn!(
                        "Rate limit hit, attempt {}/{}. Retrying in {:?}...",
                        attempt + 1,
                        max_retries,
                        delay
                    );
                    sleep(delay).await;
                } else {
                    tracing::error!(
                        "Rate limit hit on final attempt {}/{}: {}",
                        attempt + 1,
                        max_retries,
                        message
                    );
                }
            }
        }
    }

    Err(Error::RateLimited)
}

/// Same as [`with_retry`] for an operation that completes synchronously
pub async fn with_retry_sync<F, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> std::result::Result<T, E>,
    E: Display,
{
    with_retry(policy, || std::future::ready(operation())).await
}

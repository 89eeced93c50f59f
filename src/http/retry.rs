//! Bounded exponential-backoff retry for transient network failures.

use std::time::Duration;

use anyhow::{Result, anyhow};
use log::{debug, warn};

use super::error::ApiError;

/// Retry settings applied to idempotent reads.
///
/// Total attempts are bounded by `max_retries + 1`; the delay before retry
/// *k* is `base_delay * 2^(k-1)`, so the cumulative worst-case wait is
/// deterministic given the parameters.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts allowed after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the failure with the given 0-based index.
    fn delay_after(&self, failure_index: u32) -> Duration {
        self.base_delay * 2u32.pow(failure_index)
    }
}

/// Executes an async operation with retry logic.
///
/// Only timeouts, network-level failures, and server errors (5xx) are
/// retried; client errors and anything unclassified fail immediately. The
/// wrapped operation is transport-agnostic: any `Fn() -> Future` works.
pub async fn with_retry<F, Fut, T>(
    policy: RetryPolicy,
    operation_name: &str,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let attempts = policy.max_retries + 1;
    let mut last_error = None;

    for attempt in 0..attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !is_retryable_error(&e) {
                    debug!("{}: non-retryable error: {}", operation_name, e);
                    return Err(e);
                }

                if attempt + 1 < attempts {
                    let delay = policy.delay_after(attempt);
                    warn!(
                        "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                        operation_name,
                        attempt + 1,
                        attempts,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| anyhow!("{}: failed after {} attempts", operation_name, attempts)))
}

/// An error is retryable only when it classifies into a transient class.
fn is_retryable_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_retryable)
}

// src/application/resilience/retry.rs
//! Retry with exponential backoff.
//!
//! The delay before attempt `k + 1` is `base_delay * 2^(k - 1)`, capped at
//! `max_delay`. No jitter is applied.

use crate::application::error::{ApplicationError, ApplicationResult};
use backon::{ExponentialBuilder, Retryable};
use std::{
    future::Future,
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero is treated as one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(300),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Self::default()
        }
    }

    /// Delay slept after failed attempt `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds or `policy.max_attempts` attempts have
/// failed, returning the last error in that case.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> ApplicationResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApplicationResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    // backon counts retries, not attempts
    let backoff = ExponentialBuilder::new()
        .with_min_delay(policy.base_delay)
        .with_max_delay(policy.max_delay)
        .with_factor(2.0)
        .with_max_times(max_attempts.saturating_sub(1) as usize);

    let failed_attempts = AtomicU32::new(0);

    operation
        .retry(backoff)
        .sleep(tokio::time::sleep)
        .notify(|err: &ApplicationError, delay: Duration| {
            let attempt = failed_attempts.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::warn!(
                operation = operation_name,
                attempt,
                max_attempts,
                backoff_ms = delay.as_millis() as u64,
                error = %err,
                "attempt failed, retrying after backoff"
            );
        })
        .await
        .inspect_err(|err| {
            tracing::error!(
                operation = operation_name,
                attempts = failed_attempts.load(Ordering::SeqCst) + 1,
                error = %err,
                "operation failed after exhausting retries"
            );
        })
}

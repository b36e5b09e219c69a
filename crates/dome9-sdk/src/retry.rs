//! Bounded retry for flaky API operations
//!
//! A handful of endpoints answer with transient failures right after a related
//! resource was created (onboarding returns 404 until the account is visible,
//! integrations occasionally fail with 5xx). Those calls go through [`retry`]
//! with a fixed attempt bound and a simple sleep between attempts.

use crate::error::{Dome9Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Delay schedule between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay after every failed attempt
    Fixed(Duration),
    /// `attempt * step` after the n-th failed attempt
    Linear(Duration),
}

/// Retry configuration for a single operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,

    /// Delay schedule
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Onboarding creation: 3 attempts, 5 seconds apart
    pub const ONBOARDING_CREATE: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        backoff: Backoff::Fixed(Duration::from_secs(5)),
    };

    /// Integration get/delete: 3 attempts, 2s then 4s apart
    pub const INTEGRATION: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        backoff: Backoff::Linear(Duration::from_secs(2)),
    };

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed(delay) => delay,
            Backoff::Linear(step) => step * attempt,
        }
    }
}

/// Retry only when the resource is not visible yet, or nothing came back
pub fn retry_on_not_found(err: &Dome9Error) -> bool {
    match err.status() {
        Some(status) => status == 404,
        None => is_no_response(err),
    }
}

/// Retry on any error status outside the 4xx range, or when nothing came back
pub fn retry_on_server_error(err: &Dome9Error) -> bool {
    match err.status() {
        Some(status) => !(400..500).contains(&status),
        None => is_no_response(err),
    }
}

fn is_no_response(err: &Dome9Error) -> bool {
    matches!(err, Dome9Error::Http(_) | Dome9Error::Transport(_))
}

/// Run `call` until it succeeds, fails with a non-retryable error, or the
/// attempt bound is reached
///
/// Non-retryable errors are returned untouched. When every attempt failed the
/// last error is wrapped in [`Dome9Error::RetriesExhausted`].
pub async fn retry<T, F, Fut, P>(
    operation: &str,
    policy: &RetryPolicy,
    mut call: F,
    is_retryable: P,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&Dome9Error) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retryable(&err) {
            return Err(err);
        }

        if attempt >= max_attempts {
            tracing::warn!("{} failed after {} attempts: {}", operation, attempt, err);
            return Err(Dome9Error::RetriesExhausted {
                operation: operation.to_string(),
                attempts: attempt,
                source: Box::new(err),
            });
        }

        let delay = policy.delay_for_attempt(attempt);
        tracing::debug!(
            "{} attempt {}/{} failed ({}), retrying in {:?}",
            operation,
            attempt,
            max_attempts,
            err,
            delay
        );
        sleep(delay).await;
        attempt += 1;
    }
}

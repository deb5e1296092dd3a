//! Retry logic with linear backoff
//!
//! This module provides retry logic for transient fetch failures. Backoff is
//! linear in the attempt number — the delay before retry `n` is
//! `backoff_base * n` — with no jitter and no cap. The schedule is an
//! observable contract: callers can predict exactly how long a failing call
//! sleeps, and tests assert the delays under Tokio's paused clock.
//!
//! # Example
//!
//! ```no_run
//! use affect_harvest::retry::{IsRetryable, fetch_with_retry};
//! use affect_harvest::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{self:?}")
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! let result = fetch_with_retry(&config, || async {
//!     // Your operation here
//!     Ok::<_, MyError>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::FetchError;
use std::future::Future;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (network timeouts, connection resets, server busy)
/// should return `true`. Fatal failures (bad status, malformed response)
/// should return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network-level failures happen below the status layer and are
            // expected to clear on retry
            FetchError::Transport(_) => true,
            // 429/500/502/503/504
            FetchError::RetryableStatus { .. } => true,
            // Any other status, and any malformed or mis-shaped response
            FetchError::FatalStatus { .. }
            | FetchError::NotJson { .. }
            | FetchError::InvalidJson(_)
            | FetchError::UnexpectedShape(_) => false,
        }
    }
}

/// Execute an async operation with linear-backoff retry logic
///
/// Attempts are numbered from 1 up to `config.max_attempts`. After a
/// transient failure on attempt `n` (with attempts remaining) the loop sleeps
/// `config.backoff_base * n` and tries again. A fatal failure, or a transient
/// failure on the final attempt, is returned as-is — the caller sees the last
/// observed error, not a wrapper.
pub async fn fetch_with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "fetch succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                let delay = config.backoff_base * attempt;

                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "transient fetch failure, backing off"
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(
                        error = %e,
                        attempts = attempt,
                        "fetch failed after all retry attempts exhausted"
                    );
                } else {
                    tracing::error!(error = %e, "fetch failed with fatal error");
                }
                return Err(e);
            }
        }
    }
}

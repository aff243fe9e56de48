//! Retry with exponential backoff for page fetches.
//!
//! Only transient transport failures are retried. Anything that would
//! return the same answer on a second request propagates immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` is worth another attempt after a backoff delay.
///
/// Retriable:
/// - [`ScraperError::Http`]: network failure, TLS reset, timeout.
/// - [`ScraperError::UnexpectedStatus`] with 429 or any 5xx.
///
/// Everything else (4xx, invalid URL) is returned immediately.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        ScraperError::InvalidUrl { .. } => false,
    }
}

/// Wait before retry `n` (0-based): `base_secs * 2^n`, saturating.
fn backoff_delay(base_secs: u64, n: u32) -> Duration {
    Duration::from_secs(base_secs.saturating_mul(1u64 << n.min(62)))
}

/// Runs `operation` once, then again after each backoff delay while it
/// keeps failing with retriable errors, for at most `max_retries` extra
/// attempts.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut delays = (0..max_retries).map(|n| backoff_delay(backoff_base_secs, n));

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) => {
                let Some(delay) = delays.next() else {
                    return Err(err);
                };
                tracing::warn!(error = %err, delay_secs = delay.as_secs(), "retrying page fetch");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

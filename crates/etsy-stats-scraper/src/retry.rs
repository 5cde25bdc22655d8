//! Bounded re-query on stale element references.
//!
//! A re-render between locating an element and reading it invalidates the
//! handle. The fix is to re-run the whole locate-and-read step, so callers
//! pass a closure that performs both.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

fn is_retriable(err: &ScraperError) -> bool {
    matches!(err, ScraperError::StaleReference)
}

/// Runs `operation`, re-running it up to `max_retries` more times while it
/// fails with [`ScraperError::StaleReference`].
///
/// Sleeps `backoff` between attempts. Any other error is returned at once.
/// Once retries are exhausted the stale error is returned.
pub(crate) async fn retry_stale<T, F, Fut>(
    max_retries: u32,
    backoff: Duration,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
            }
        }

        attempt += 1;
        tracing::debug!(attempt, max_retries, "stale element reference, re-querying");
        if !backoff.is_zero() {
            tokio::time::sleep(backoff).await;
        }
    }
}

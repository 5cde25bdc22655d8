//! Exponential back-off with jitter for Sheets API calls.

use std::future::Future;
use std::time::Duration;

use crate::error::SheetsError;

/// Longest pause before jitter; the Sheets quota window is one minute.
const MAX_BACKOFF_MS: u64 = 60_000;

/// Returns `true` for rate limiting, server errors and network failures.
pub(crate) fn is_retriable(err: &SheetsError) -> bool {
    match err {
        SheetsError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SheetsError::Api { status, .. } => *status == 429 || (500..600).contains(status),
        SheetsError::Deserialize { .. }
        | SheetsError::InvalidBaseUrl { .. }
        | SheetsError::MissingConfig(_) => false,
    }
}

/// Pause before retry number `retry` (0-based): `base_ms * 2^retry`, capped,
/// plus up to a quarter of that again at random.
fn backoff_delay(base_ms: u64, retry: u32) -> Duration {
    let step = base_ms
        .saturating_mul(1u64 << retry.min(16))
        .min(MAX_BACKOFF_MS);
    let jitter = rand::random_range(0..=step / 4);
    Duration::from_millis(step + jitter)
}

/// Runs `operation`, re-running it up to `max_retries` more times while it
/// fails with a retriable error.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SheetsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SheetsError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retries == max_retries || !is_retriable(&err) {
            return Err(err);
        }

        let delay = backoff_delay(backoff_base_ms, retries);
        retries += 1;
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "sheets request failed, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}

//! Randomized human-like pauses taken before every navigation and click.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws pause lengths uniformly from `[min, max]` milliseconds.
///
/// The RNG is seedable so tests get a reproducible sequence, and every pause
/// taken is counted.
#[derive(Debug)]
pub struct DelayPolicy {
    min_ms: u64,
    max_ms: u64,
    rng: Mutex<StdRng>,
    taken: AtomicU64,
}

impl DelayPolicy {
    /// Creates a policy seeded from the OS RNG. A reversed range is swapped.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self::with_rng(min_ms, max_ms, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn seeded(min_ms: u64, max_ms: u64, seed: u64) -> Self {
        Self::with_rng(min_ms, max_ms, StdRng::seed_from_u64(seed))
    }

    /// A policy that never sleeps. Still counts pauses.
    #[must_use]
    pub fn none() -> Self {
        Self::seeded(0, 0, 0)
    }

    fn with_rng(min_ms: u64, max_ms: u64, rng: StdRng) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
            rng: Mutex::new(rng),
            taken: AtomicU64::new(0),
        }
    }

    /// Draws the next pause length without sleeping.
    pub fn next_delay(&self) -> Duration {
        if self.max_ms == self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = match self.rng.lock() {
            Ok(mut rng) => rng.random_range(self.min_ms..=self.max_ms),
            Err(poisoned) => poisoned
                .into_inner()
                .random_range(self.min_ms..=self.max_ms),
        };
        Duration::from_millis(ms)
    }

    /// Sleeps for a freshly drawn duration.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        self.taken.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(delay_ms = delay.as_millis(), "pausing before browser action");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Number of pauses taken so far.
    #[must_use]
    pub fn taken(&self) -> u64 {
        self.taken.load(Ordering::Relaxed)
    }
}

//! Page-driving scraper over any [`Browser`].
//!
//! [`EtsyScraper`] bundles the browser handle with pacing and wait settings.
//! Its behaviour is split across submodules: the wait engine, navigation,
//! pagination, per-listing extraction, and the two collectors.

mod analytics;
mod collector;
mod extract;
mod navigation;
mod pagination;
mod read;
mod wait;

use std::future::Future;
use std::time::Duration;

use etsy_stats_core::{BrowserConfig, RecordFailurePolicy};

use crate::browser::Browser;
use crate::delay::DelayPolicy;
use crate::error::ScraperError;
use crate::retry::retry_stale;

pub use collector::CollectedListings;
pub use navigation::PageState;
pub use wait::{Resolved, Visibility};

/// Deadlines and limits for one scraping run.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Render deadline for every wait.
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
    /// Extra attempts after a stale element reference during a read.
    pub stale_retries: u32,
    /// Page cap for every paginated loop.
    pub max_pages: usize,
    pub record_failure_policy: RecordFailurePolicy,
}

impl ScrapeSettings {
    #[must_use]
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            wait_timeout: config.wait_timeout(),
            poll_interval: config.poll_interval(),
            stale_retries: config.stale_retries,
            max_pages: config.max_pages,
            record_failure_policy: config.record_failure_policy,
        }
    }
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(250),
            stale_retries: 3,
            max_pages: 200,
            record_failure_policy: RecordFailurePolicy::default(),
        }
    }
}

/// Drives one exclusively owned browser through the seller dashboard.
pub struct EtsyScraper<'a, B: Browser> {
    pub(crate) browser: &'a B,
    pub(crate) settings: ScrapeSettings,
    pub(crate) delay: DelayPolicy,
}

impl<'a, B: Browser> EtsyScraper<'a, B> {
    #[must_use]
    pub fn new(browser: &'a B, settings: ScrapeSettings, delay: DelayPolicy) -> Self {
        Self {
            browser,
            settings,
            delay,
        }
    }

    /// Builds a scraper with settings and an OS-seeded delay policy taken
    /// from `config`.
    #[must_use]
    pub fn from_config(browser: &'a B, config: &BrowserConfig) -> Self {
        Self::new(
            browser,
            ScrapeSettings::from_config(config),
            DelayPolicy::new(config.min_delay_ms, config.max_delay_ms),
        )
    }

    #[must_use]
    pub fn settings(&self) -> &ScrapeSettings {
        &self.settings
    }

    #[must_use]
    pub fn delay(&self) -> &DelayPolicy {
        &self.delay
    }

    /// Re-runs a locate-and-read step while it hits stale references.
    pub(crate) async fn read_with_retry<T, F, Fut>(&self, operation: F) -> Result<T, ScraperError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ScraperError>>,
    {
        retry_stale(
            self.settings.stale_retries,
            self.settings.poll_interval,
            operation,
        )
        .await
    }

    pub(crate) fn wait_timeout_ms(&self) -> u64 {
        u64::try_from(self.settings.wait_timeout.as_millis()).unwrap_or(u64::MAX)
    }

    pub(crate) fn pagination_limit(&self, context: impl Into<String>) -> ScraperError {
        ScraperError::PaginationLimit {
            context: context.into(),
            max_pages: self.settings.max_pages,
        }
    }
}

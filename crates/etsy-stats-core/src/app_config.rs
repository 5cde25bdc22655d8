use std::path::PathBuf;
use std::time::Duration;

/// What the collector does when one listing fails extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFailurePolicy {
    /// Log the failure, remember the listing id, and keep going.
    #[default]
    Skip,
    /// Stop the whole run on the first failed listing.
    Abort,
}

impl std::fmt::Display for RecordFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFailurePolicy::Skip => write!(f, "skip"),
            RecordFailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Browser pacing and WebDriver session settings.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub chrome_binary: Option<PathBuf>,
    /// Chrome "User Data" root. Copied to a temp dir for every run.
    pub chrome_user_data_dir: Option<PathBuf>,
    pub headless: bool,
    pub user_agent: String,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub wait_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub stale_retries: u32,
    pub max_pages: usize,
    pub record_failure_policy: RecordFailurePolicy,
}

impl BrowserConfig {
    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Google Sheets publishing settings.
#[derive(Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    pub access_token: Option<String>,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub profile_path: PathBuf,
    pub browser: BrowserConfig,
    pub sheets: SheetsConfig,
}

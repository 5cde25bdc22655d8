use crate::app_config::{AppConfig, BrowserConfig, RecordFailurePolicy, SheetsConfig};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here so tests can drive it with a plain
/// `HashMap` lookup instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let min_delay_ms = parse_u64("ETSY_STATS_MIN_DELAY_MS", "1000")?;
    let max_delay_ms = parse_u64("ETSY_STATS_MAX_DELAY_MS", "3000")?;
    if max_delay_ms < min_delay_ms {
        return Err(invalid(
            "ETSY_STATS_MAX_DELAY_MS",
            format!("must be >= ETSY_STATS_MIN_DELAY_MS ({min_delay_ms})"),
        ));
    }

    let wait_timeout_secs = parse_u64("ETSY_STATS_WAIT_TIMEOUT_SECS", "30")?;
    if wait_timeout_secs == 0 {
        return Err(invalid(
            "ETSY_STATS_WAIT_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let poll_interval_ms = parse_u64("ETSY_STATS_POLL_INTERVAL_MS", "250")?;
    let stale_retries = parse_u32("ETSY_STATS_STALE_RETRIES", "3")?;
    let max_pages = parse_usize("ETSY_STATS_MAX_PAGES", "200")?;
    let record_failure_policy =
        parse_failure_policy(&or_default("ETSY_STATS_RECORD_FAILURE_POLICY", "skip"))?;
    let headless = parse_bool("ETSY_STATS_HEADLESS", &or_default("ETSY_STATS_HEADLESS", "true"))?;

    let browser = BrowserConfig {
        webdriver_url: or_default("ETSY_STATS_WEBDRIVER_URL", "http://localhost:9515"),
        chrome_binary: optional("ETSY_STATS_CHROME_BINARY").map(PathBuf::from),
        chrome_user_data_dir: optional("ETSY_STATS_CHROME_USER_DATA_DIR").map(PathBuf::from),
        headless,
        user_agent: or_default("ETSY_STATS_USER_AGENT", DEFAULT_USER_AGENT),
        min_delay_ms,
        max_delay_ms,
        wait_timeout_secs,
        poll_interval_ms,
        stale_retries,
        max_pages,
        record_failure_policy,
    };

    let sheets = SheetsConfig {
        spreadsheet_id: optional("ETSY_STATS_SPREADSHEET_ID"),
        access_token: optional("GOOGLE_SHEETS_ACCESS_TOKEN"),
        request_timeout_secs: parse_u64("ETSY_STATS_SHEETS_TIMEOUT_SECS", "30")?,
        max_retries: parse_u32("ETSY_STATS_SHEETS_MAX_RETRIES", "3")?,
    };

    Ok(AppConfig {
        log_level: or_default("ETSY_STATS_LOG_LEVEL", "info"),
        log_dir: PathBuf::from(or_default("ETSY_STATS_LOG_DIR", "./logs")),
        profile_path: PathBuf::from(or_default(
            "ETSY_STATS_PROFILE_PATH",
            "./config/profile.yaml",
        )),
        browser,
        sheets,
    })
}

/// Parse the record failure policy. Only `skip` and `abort` are accepted.
fn parse_failure_policy(s: &str) -> Result<RecordFailurePolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "skip" => Ok(RecordFailurePolicy::Skip),
        "abort" => Ok(RecordFailurePolicy::Abort),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ETSY_STATS_RECORD_FAILURE_POLICY".to_string(),
            reason: format!("expected 'skip' or 'abort', got '{other}'"),
        }),
    }
}

fn parse_bool(var: &str, s: &str) -> Result<bool, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

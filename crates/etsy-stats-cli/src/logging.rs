//! Subscriber setup: human-readable stderr plus a plain-text log file.

use anyhow::Context;
use etsy_stats_core::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE: &str = "etsy-stats.log";

/// Dependencies whose debug output drowns the scraper's own events.
const NOISY_TARGETS: [&str; 3] = ["fantoccini", "hyper", "reqwest"];

/// `RUST_LOG` when set, else `level`, with noisy dependencies capped at warn.
pub(crate) fn build_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    for target in NOISY_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse()?);
    }
    Ok(filter)
}

/// Installs the global subscriber. Keep the guard alive for the whole run
/// or buffered file output is lost.
pub(crate) fn init(config: &AppConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log dir {}", config.log_dir.display()))?;

    let appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(build_filter(&config.log_level)?)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

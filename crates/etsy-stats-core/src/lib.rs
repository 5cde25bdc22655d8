//! Shared domain types, configuration, and the pure aggregation step for
//! the etsy-stats workspace.

pub mod aggregate;
pub mod analytics;
pub mod app_config;
pub mod config;
pub mod date_range;
pub mod listing;
pub mod profile;

use thiserror::Error;

pub use aggregate::{aggregate, rollup_search_terms, rollup_tags};
pub use analytics::SearchQueryAnalytics;
pub use app_config::{AppConfig, BrowserConfig, RecordFailurePolicy, SheetsConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use date_range::DateRange;
pub use listing::{
    AggregateStatistic, ListingRecord, SearchTermObservation, SearchTermTotal, SkippedListing,
    TagUsage, TrafficSources,
};
pub use profile::{load_profile, save_profile, UserProfile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profile file {path}: {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file: {0}")]
    ProfileFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

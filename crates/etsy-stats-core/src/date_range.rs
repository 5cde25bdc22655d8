//! Reporting windows offered to the user and their query-string encodings.
//!
//! The listing statistics page and the search analytics page encode the same
//! windows differently, so each range knows both encodings.

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRange {
    Last30Days,
    ThisMonth,
    ThisYear,
    LastYear,
    AllTime,
}

#[derive(Debug, Error)]
#[error("unknown date range '{0}' (expected one of: last-30-days, this-month, this-year, last-year, all-time)")]
pub struct ParseDateRangeError(String);

impl DateRange {
    /// All ranges in menu order.
    pub const ALL: [DateRange; 5] = [
        DateRange::Last30Days,
        DateRange::ThisMonth,
        DateRange::ThisYear,
        DateRange::LastYear,
        DateRange::AllTime,
    ];

    /// Human-readable label used in prompts and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DateRange::Last30Days => "last 30 days",
            DateRange::ThisMonth => "this month",
            DateRange::ThisYear => "this year",
            DateRange::LastYear => "last year",
            DateRange::AllTime => "all time",
        }
    }

    /// Query string for the per-listing statistics page.
    #[must_use]
    pub fn stats_query(self) -> &'static str {
        match self {
            DateRange::Last30Days => "date_range=last_30",
            DateRange::ThisMonth => "date_range=this_month",
            DateRange::ThisYear => "date_range=this_year",
            DateRange::LastYear => "date_range=last_year",
            DateRange::AllTime => "date_range=all_time",
        }
    }

    /// Query string for the shop-wide search analytics page.
    ///
    /// The analytics page has no all-time window; `None` means "use the
    /// page default".
    #[must_use]
    pub fn analytics_query(self, today: NaiveDate) -> Option<String> {
        match self {
            DateRange::Last30Days => {
                let start = today - Duration::days(30);
                Some(format!(
                    "dateRange=undefined&startDate={}&endDate={}",
                    start.format("%m%%2F%d%%2F%Y"),
                    today.format("%m%%2F%d%%2F%Y")
                ))
            }
            DateRange::ThisMonth => Some("dateRange=this-month".to_string()),
            DateRange::ThisYear => Some("dateRange=this-year".to_string()),
            DateRange::LastYear => Some("dateRange=last-year".to_string()),
            DateRange::AllTime => None,
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DateRange::Last30Days => "last-30-days",
            DateRange::ThisMonth => "this-month",
            DateRange::ThisYear => "this-year",
            DateRange::LastYear => "last-year",
            DateRange::AllTime => "all-time",
        };
        f.write_str(s)
    }
}

impl FromStr for DateRange {
    type Err = ParseDateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-30-days" | "last30days" | "last_30" => Ok(DateRange::Last30Days),
            "this-month" | "this_month" => Ok(DateRange::ThisMonth),
            "this-year" | "this_year" => Ok(DateRange::ThisYear),
            "last-year" | "last_year" => Ok(DateRange::LastYear),
            "all-time" | "all_time" => Ok(DateRange::AllTime),
            _ => Err(ParseDateRangeError(s.to_string())),
        }
    }
}

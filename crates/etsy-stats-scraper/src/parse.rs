//! Text-to-value parsing for scraped cells.
//!
//! Page text arrives with currency symbols, percent signs, and thousands
//! separators. Everything here strips that down to something `Decimal` or
//! `u64` can parse, and reports the raw text on failure.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ScraperError;

static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d[\d,]*(?:\.\d+)?|\.\d+").expect("valid number token regex")
});

/// Returns the first numeric token in `text` with thousands separators
/// removed, or `None` when the text holds no digits.
///
/// `"$1,234.50 USD"` → `"1234.50"`, `"12.5%"` → `"12.5"`.
#[must_use]
pub fn extract_number(text: &str) -> Option<String> {
    NUMBER_TOKEN
        .find(text)
        .map(|m| m.as_str().replace(',', ""))
}

/// Parses a non-negative decimal, tolerating surrounding whitespace and
/// thousands separators but nothing else.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidNumber`] naming `field` when the text is
/// not a plain non-negative decimal.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, ScraperError> {
    let cleaned = raw.trim().replace(',', "");
    match Decimal::from_str(&cleaned) {
        Ok(value) if !value.is_sign_negative() => Ok(value),
        _ => Err(invalid(field, raw)),
    }
}

/// Reduces `raw` to its numeric token, then parses it as a decimal.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidNumber`] when the text has no numeric token.
pub fn parse_decimal_token(field: &str, raw: &str) -> Result<Decimal, ScraperError> {
    let token = extract_number(raw).ok_or_else(|| invalid(field, raw))?;
    parse_decimal(field, &token)
}

/// Parses a whole-number count such as a visit total (`"1,204"`).
///
/// # Errors
///
/// Returns [`ScraperError::InvalidNumber`] when the text is not a
/// non-negative integer.
pub fn parse_count(field: &str, raw: &str) -> Result<u64, ScraperError> {
    raw.trim()
        .replace(',', "")
        .parse::<u64>()
        .map_err(|_| invalid(field, raw))
}

/// Listing id from a listing-link href: the last non-empty path segment,
/// ignoring any query string or fragment.
///
/// `".../listing-editor/edit/123456?ref=stats"` → `"123456"`.
#[must_use]
pub fn listing_id_from_href(href: &str) -> Option<String> {
    let path = href
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
}

fn invalid(field: &str, raw: &str) -> ScraperError {
    ScraperError::InvalidNumber {
        field: field.to_owned(),
        raw: raw.to_owned(),
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;

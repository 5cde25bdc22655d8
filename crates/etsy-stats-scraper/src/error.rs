use std::fmt;

use thiserror::Error;

/// Which half of a listing's extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPass {
    Statistics,
    Edit,
}

impl fmt::Display for ExtractionPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionPass::Statistics => write!(f, "statistics"),
            ExtractionPass::Edit => write!(f, "edit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("page {url} rendered neither {content} nor the empty state within {waited_ms}ms")]
    PageLoad {
        url: String,
        content: String,
        waited_ms: u64,
    },

    #[error("timed out after {waited_ms}ms waiting for {what} ({selector})")]
    Timeout {
        what: String,
        selector: String,
        waited_ms: u64,
    },

    #[error("failed to extract listing {listing_id} during {pass} pass: {source}")]
    RecordExtraction {
        listing_id: String,
        pass: ExtractionPass,
        #[source]
        source: Box<ScraperError>,
    },

    #[error("element reference went stale and did not recover")]
    StaleReference,

    #[error("required element missing: {what} ({selector})")]
    MissingElement { what: String, selector: String },

    #[error("invalid number for {field}: \"{raw}\"")]
    InvalidNumber { field: String, raw: String },

    #[error("pagination limit reached for {context}: exceeded {max_pages} pages")]
    PaginationLimit { context: String, max_pages: usize },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("browser session error: {0}")]
    Session(String),
}

impl ScraperError {
    /// Returns `true` when the failure is confined to a single listing and the
    /// run can move on to the next one.
    ///
    /// Browser and session failures mean the driver itself is unusable, so
    /// they are never record-scoped even when wrapped in
    /// [`ScraperError::RecordExtraction`].
    #[must_use]
    pub fn is_record_scoped(&self) -> bool {
        match self {
            ScraperError::RecordExtraction { source, .. } => source.is_record_scoped(),
            ScraperError::Browser(_) | ScraperError::Session(_) => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(source: ScraperError) -> ScraperError {
        ScraperError::RecordExtraction {
            listing_id: "123".to_string(),
            pass: ExtractionPass::Edit,
            source: Box::new(source),
        }
    }

    #[test]
    fn record_extraction_message_names_listing_and_pass() {
        let err = wrapped(ScraperError::StaleReference);
        let msg = err.to_string();
        assert!(msg.contains("listing 123"), "got: {msg}");
        assert!(msg.contains("edit pass"), "got: {msg}");
    }

    #[test]
    fn browser_failures_are_not_record_scoped() {
        assert!(!wrapped(ScraperError::Browser("session deleted".to_string())).is_record_scoped());
        assert!(!ScraperError::Session("no chromedriver".to_string()).is_record_scoped());
    }

    #[test]
    fn extraction_failures_are_record_scoped() {
        let err = wrapped(ScraperError::MissingElement {
            what: "title".to_string(),
            selector: "//span".to_string(),
        });
        assert!(err.is_record_scoped());
    }
}

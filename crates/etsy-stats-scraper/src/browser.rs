//! The browser boundary the scraper drives.
//!
//! Selectors are XPath strings. Element-scoped lookups are evaluated relative
//! to the element, so callers pass relative paths (`td[1]`, `option`) there.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ScraperError;

#[derive(Debug, Error)]
pub enum BrowserError {
    /// The element handle was invalidated by a re-render.
    #[error("stale element reference")]
    Stale,

    /// Session lost, protocol failure, or any other driver-side error.
    #[error("{0}")]
    Command(String),
}

impl From<BrowserError> for ScraperError {
    fn from(err: BrowserError) -> Self {
        match err {
            BrowserError::Stale => ScraperError::StaleReference,
            BrowserError::Command(msg) => ScraperError::Browser(msg),
        }
    }
}

/// A live document the scraper can navigate and query.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Element;

    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// All elements matching `xpath` in the current document, in document
    /// order. No match is an empty vec, not an error.
    async fn find_all(&self, xpath: &str) -> Result<Vec<Self::Element>, BrowserError>;
}

/// A handle to one element of the current document.
#[async_trait]
pub trait Element: Send + Sync + Sized {
    /// Rendered text, as the user would see it.
    async fn text(&self) -> Result<String, BrowserError>;

    async fn attr(&self, name: &str) -> Result<Option<String>, BrowserError>;

    async fn is_displayed(&self) -> Result<bool, BrowserError>;

    async fn is_enabled(&self) -> Result<bool, BrowserError>;

    async fn is_selected(&self) -> Result<bool, BrowserError>;

    async fn click(&self) -> Result<(), BrowserError>;

    async fn find_all(&self, xpath: &str) -> Result<Vec<Self>, BrowserError>;
}

//! Browser-driven collection of Etsy listing statistics and search
//! analytics.
//!
//! [`EtsyScraper`] drives any [`Browser`]; [`webdriver`] provides the
//! chromedriver-backed implementation and scoped session handling.

pub mod browser;
pub mod delay;
pub mod error;
pub mod parse;
mod retry;
pub mod scraper;
pub mod selectors;
pub mod urls;
pub mod webdriver;

pub use browser::{Browser, BrowserError, Element};
pub use delay::DelayPolicy;
pub use error::{ExtractionPass, ScraperError};
pub use scraper::{
    CollectedListings, EtsyScraper, PageState, Resolved, ScrapeSettings, Visibility,
};
pub use webdriver::{run_in_session, with_session, ScopedSession, WebDriverBrowser, WebDriverSession};

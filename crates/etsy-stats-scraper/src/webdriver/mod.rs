//! WebDriver (chromedriver) implementation of the browser boundary.

mod profile;
mod session;

use async_trait::async_trait;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, Locator};

use crate::browser::{Browser, BrowserError, Element};
use crate::error::ScraperError;

pub use session::{run_in_session, with_session, ScopedSession, WebDriverSession};

/// A connected WebDriver session.
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Ends the WebDriver session. The browser window closes with it.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Session`] if the driver rejects the request.
    pub async fn close(self) -> Result<(), ScraperError> {
        self.client
            .close()
            .await
            .map_err(|e| ScraperError::Session(format!("failed to close WebDriver session: {e}")))
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Element = WebDriverElement;

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.client.goto(url).await.map_err(classify)
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<WebDriverElement>, BrowserError> {
        let found = self
            .client
            .find_all(Locator::XPath(xpath))
            .await
            .map_err(classify)?;
        Ok(found.into_iter().map(WebDriverElement).collect())
    }
}

pub struct WebDriverElement(fantoccini::elements::Element);

#[async_trait]
impl Element for WebDriverElement {
    async fn text(&self) -> Result<String, BrowserError> {
        self.0.text().await.map_err(classify)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, BrowserError> {
        self.0.attr(name).await.map_err(classify)
    }

    async fn is_displayed(&self) -> Result<bool, BrowserError> {
        self.0.is_displayed().await.map_err(classify)
    }

    async fn is_enabled(&self) -> Result<bool, BrowserError> {
        self.0.is_enabled().await.map_err(classify)
    }

    async fn is_selected(&self) -> Result<bool, BrowserError> {
        self.0.is_selected().await.map_err(classify)
    }

    async fn click(&self) -> Result<(), BrowserError> {
        self.0.click().await.map_err(classify)
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<Self>, BrowserError> {
        let found = self
            .0
            .find_all(Locator::XPath(xpath))
            .await
            .map_err(classify)?;
        Ok(found.into_iter().map(WebDriverElement).collect())
    }
}

fn classify(err: CmdError) -> BrowserError {
    match &err {
        CmdError::Standard(wd) if matches!(wd.error, ErrorStatus::StaleElementReference) => {
            BrowserError::Stale
        }
        _ => BrowserError::Command(err.to_string()),
    }
}

use crate::browser::Browser;
use crate::error::ScraperError;

use super::wait::Resolved;
use super::EtsyScraper;

/// Outcome of a successful navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// The content selector rendered.
    Loaded,
    /// Only the empty-state selector rendered.
    Empty,
}

impl<B: Browser> EtsyScraper<'_, B> {
    /// Pauses, loads `url`, then waits for `content` or `empty`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::PageLoad`] when neither selector renders
    /// before the deadline. Not retried.
    pub async fn navigate_and_wait(
        &self,
        url: &str,
        content: &str,
        empty: Option<&str>,
    ) -> Result<PageState, ScraperError> {
        self.delay.pause().await;
        tracing::debug!(url, "navigating");
        self.browser.goto(url).await?;

        match self.wait_for_either(content, empty).await? {
            Some(Resolved::Content) => Ok(PageState::Loaded),
            Some(Resolved::Alternate) => {
                tracing::debug!(url, "page rendered empty state");
                Ok(PageState::Empty)
            }
            None => Err(ScraperError::PageLoad {
                url: url.to_owned(),
                content: content.to_owned(),
                waited_ms: self.wait_timeout_ms(),
            }),
        }
    }
}

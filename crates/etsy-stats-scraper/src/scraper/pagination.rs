//! "Click next, wait for the content to change" paging.
//!
//! The same protocol drives the listing manager, the per-listing search-term
//! table, and the search analytics table. Only the scope that holds the next
//! button and the anchor whose text proves the page turned differ.

use crate::browser::{Browser, Element};
use crate::error::ScraperError;
use crate::selectors::NEXT_PAGE_BUTTON;

use super::read::{first_text, missing};
use super::EtsyScraper;

impl<B: Browser> EtsyScraper<'_, B> {
    /// Turns to the next page inside `scope` (an XPath prefix; `""` for the
    /// whole document).
    ///
    /// Returns `false`, without clicking, when there is no enabled next
    /// button. Returns `true` only after the first `anchor` match shows new
    /// text.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Timeout`] if the anchor text never changes
    /// after the click, or [`ScraperError::MissingElement`] if there is no
    /// anchor to watch.
    pub async fn advance_page(&self, scope: &str, anchor: &str) -> Result<bool, ScraperError> {
        let next_button = format!("{scope}{NEXT_PAGE_BUTTON}");
        let button = next_button.as_str();
        let browser = self.browser;

        let enabled = self
            .read_with_retry(move || async move {
                let enabled = match browser.find_all(button).await?.first() {
                    Some(next) => next.is_enabled().await?,
                    None => false,
                };
                Ok::<bool, ScraperError>(enabled)
            })
            .await?;
        if !enabled {
            tracing::debug!(scope, "no enabled next-page control");
            return Ok(false);
        }

        let initial = self
            .read_with_retry(move || first_text(browser, anchor, "page anchor"))
            .await?;

        self.delay.pause().await;
        self.read_with_retry(move || async move {
            let buttons = browser.find_all(button).await?;
            let next = buttons
                .first()
                .ok_or_else(|| missing("next-page control", button))?;
            next.click().await?;
            Ok::<(), ScraperError>(())
        })
        .await?;

        let current = self.wait_for_text_change(anchor, &initial).await?;
        tracing::debug!(scope, from = %initial, to = %current, "page advanced");
        Ok(true)
    }
}

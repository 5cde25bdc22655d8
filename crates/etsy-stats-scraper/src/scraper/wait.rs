//! Locator wait engine: poll the live document until a condition holds or
//! the render deadline passes.
//!
//! A stale element reference during a probe counts as "not yet". Any other
//! browser failure ends the wait immediately.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::browser::{Browser, BrowserError, Element};
use crate::error::ScraperError;

use super::EtsyScraper;

/// What counts as "present" for a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// At least one element matches.
    Present,
    /// At least one element matches and every match is displayed and enabled.
    Interactive,
}

/// Which side of a disjunctive wait resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Content,
    Alternate,
}

impl<B: Browser> EtsyScraper<'_, B> {
    /// Polls `predicate` every poll interval until it returns `true` or
    /// `timeout` elapses. The predicate is always evaluated at least once.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if a probe fails with anything other
    /// than a stale reference.
    pub async fn await_condition<F, Fut>(
        &self,
        mut predicate: F,
        timeout: Duration,
    ) -> Result<bool, ScraperError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, BrowserError>>,
    {
        let found = self
            .poll_until(timeout, || {
                let probe = predicate();
                async move { probe.await.map(|held| held.then_some(())) }
            })
            .await?;
        Ok(found.is_some())
    }

    /// Blocks until `selector` is present (or interactive) and returns the
    /// matching elements.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Timeout`] when nothing qualifying matched
    /// before the render deadline.
    pub async fn wait_for_elements(
        &self,
        selector: &str,
        visibility: Visibility,
        what: &str,
    ) -> Result<Vec<B::Element>, ScraperError> {
        let browser = self.browser;
        self.poll_until(self.settings.wait_timeout, move || {
            probe_elements(browser, selector, visibility)
        })
        .await?
        .ok_or_else(|| self.timeout(what, selector))
    }

    /// Blocks until `content` or `alternate` matches. Content wins when both
    /// match. Returns `None` on timeout instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] on a non-stale browser failure.
    pub async fn wait_for_either(
        &self,
        content: &str,
        alternate: Option<&str>,
    ) -> Result<Option<Resolved>, ScraperError> {
        let browser = self.browser;
        self.poll_until(self.settings.wait_timeout, move || {
            probe_either(browser, content, alternate)
        })
        .await
    }

    /// Blocks until the first match of `selector` shows trimmed text different
    /// from `initial`, and returns the new text.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Timeout`] when the text never changed.
    pub async fn wait_for_text_change(
        &self,
        selector: &str,
        initial: &str,
    ) -> Result<String, ScraperError> {
        let browser = self.browser;
        self.poll_until(self.settings.wait_timeout, move || {
            probe_changed_text(browser, selector, initial)
        })
        .await?
        .ok_or_else(|| self.timeout("text change", selector))
    }

    pub(crate) async fn poll_until<T, F, Fut>(
        &self,
        timeout: Duration,
        mut probe: F,
    ) -> Result<Option<T>, ScraperError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, BrowserError>>,
    {
        let deadline = Instant::now() + timeout;

        loop {
            match probe().await {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) | Err(BrowserError::Stale) => {}
                Err(err) => return Err(err.into()),
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(self.settings.poll_interval.min(deadline - now)).await;
        }
    }

    fn timeout(&self, what: &str, selector: &str) -> ScraperError {
        ScraperError::Timeout {
            what: what.to_owned(),
            selector: selector.to_owned(),
            waited_ms: self.wait_timeout_ms(),
        }
    }
}

async fn probe_elements<B: Browser>(
    browser: &B,
    selector: &str,
    visibility: Visibility,
) -> Result<Option<Vec<B::Element>>, BrowserError> {
    let elements = browser.find_all(selector).await?;
    if elements.is_empty() {
        return Ok(None);
    }
    if visibility == Visibility::Interactive {
        for element in &elements {
            if !(element.is_displayed().await? && element.is_enabled().await?) {
                return Ok(None);
            }
        }
    }
    Ok(Some(elements))
}

async fn probe_either<B: Browser>(
    browser: &B,
    content: &str,
    alternate: Option<&str>,
) -> Result<Option<Resolved>, BrowserError> {
    if !browser.find_all(content).await?.is_empty() {
        return Ok(Some(Resolved::Content));
    }
    if let Some(alternate) = alternate {
        if !browser.find_all(alternate).await?.is_empty() {
            return Ok(Some(Resolved::Alternate));
        }
    }
    Ok(None)
}

async fn probe_changed_text<B: Browser>(
    browser: &B,
    selector: &str,
    initial: &str,
) -> Result<Option<String>, BrowserError> {
    let Some(first) = browser.find_all(selector).await?.into_iter().next() else {
        return Ok(None);
    };
    let text = first.text().await?.trim().to_owned();
    Ok((text != initial).then_some(text))
}

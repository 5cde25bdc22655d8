//! Single-shot element reads shared by the extractors.
//!
//! None of these retry; wrap them in `read_with_retry` so a stale handle
//! re-runs the whole lookup.

use crate::browser::{Browser, Element};
use crate::error::ScraperError;

pub(crate) fn missing(what: &str, selector: &str) -> ScraperError {
    ScraperError::MissingElement {
        what: what.to_owned(),
        selector: selector.to_owned(),
    }
}

pub(crate) async fn first_element<B: Browser>(
    browser: &B,
    selector: &str,
    what: &str,
) -> Result<B::Element, ScraperError> {
    browser
        .find_all(selector)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| missing(what, selector))
}

/// Trimmed text of the first match; a missing element is an error.
pub(crate) async fn first_text<B: Browser>(
    browser: &B,
    selector: &str,
    what: &str,
) -> Result<String, ScraperError> {
    let element = first_element(browser, selector, what).await?;
    Ok(element.text().await?.trim().to_owned())
}

/// Trimmed text of the first match, or `None` when absent or blank.
pub(crate) async fn optional_text<B: Browser>(
    browser: &B,
    selector: &str,
) -> Result<Option<String>, ScraperError> {
    match browser.find_all(selector).await?.first() {
        Some(element) => Ok(non_blank(&element.text().await?)),
        None => Ok(None),
    }
}

/// Trimmed, non-blank texts of every match in document order.
pub(crate) async fn all_texts<B: Browser>(
    browser: &B,
    selector: &str,
) -> Result<Vec<String>, ScraperError> {
    let elements = browser.find_all(selector).await?;
    let mut texts = Vec::with_capacity(elements.len());
    for element in &elements {
        if let Some(text) = non_blank(&element.text().await?) {
            texts.push(text);
        }
    }
    Ok(texts)
}

pub(crate) async fn child_text<E: Element>(
    parent: &E,
    selector: &str,
    what: &str,
) -> Result<String, ScraperError> {
    let child = parent
        .find_all(selector)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| missing(what, selector))?;
    Ok(child.text().await?.trim().to_owned())
}

pub(crate) async fn optional_child_text<E: Element>(
    parent: &E,
    selector: &str,
) -> Result<Option<String>, ScraperError> {
    match parent.find_all(selector).await?.first() {
        Some(child) => Ok(non_blank(&child.text().await?)),
        None => Ok(None),
    }
}

pub(crate) fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

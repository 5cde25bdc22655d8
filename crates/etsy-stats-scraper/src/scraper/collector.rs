//! Top-level traversal of the listing manager.

use etsy_stats_core::{
    aggregate, AggregateStatistic, DateRange, ListingRecord, RecordFailurePolicy, SkippedListing,
};

use crate::browser::{Browser, Element};
use crate::error::ScraperError;
use crate::parse::listing_id_from_href;
use crate::selectors::{listings, EMPTY_STATE};
use crate::urls;

use super::navigation::PageState;
use super::wait::Visibility;
use super::EtsyScraper;

/// Records accepted during traversal plus the listings that were skipped.
#[derive(Debug, Default)]
pub struct CollectedListings {
    pub records: Vec<ListingRecord>,
    pub skipped: Vec<SkippedListing>,
}

impl<B: Browser> EtsyScraper<'_, B> {
    /// Collects every listing for `range` and aggregates once traversal
    /// finishes.
    ///
    /// # Errors
    ///
    /// See [`Self::collect_listings`].
    pub async fn collect_statistic(
        &self,
        range: DateRange,
    ) -> Result<AggregateStatistic, ScraperError> {
        let collected = self.collect_listings(range).await?;
        let statistic = aggregate(collected.records, collected.skipped);
        tracing::info!(
            records = statistic.records.len(),
            search_terms = statistic.search_terms.len(),
            tags = statistic.tags.len(),
            skipped = statistic.skipped.len(),
            "aggregation complete"
        );
        Ok(statistic)
    }

    /// Walks listing-manager pages from 1 until the empty state renders,
    /// extracting every listing on each page.
    ///
    /// A failed listing is skipped or aborts the run according to the
    /// configured [`RecordFailurePolicy`]. Browser and session failures
    /// always abort.
    ///
    /// # Errors
    ///
    /// Page-level failures ([`ScraperError::PageLoad`],
    /// [`ScraperError::Timeout`], [`ScraperError::PaginationLimit`],
    /// [`ScraperError::Browser`]) abort the run, as does a listing failure
    /// under [`RecordFailurePolicy::Abort`].
    pub async fn collect_listings(
        &self,
        range: DateRange,
    ) -> Result<CollectedListings, ScraperError> {
        let mut collected = CollectedListings::default();
        let mut page = 0usize;

        loop {
            page += 1;
            if page > self.settings.max_pages {
                tracing::error!(page, max_pages = self.settings.max_pages, "too many listing pages");
                return Err(self.pagination_limit("listing manager"));
            }

            let url = urls::listings_page(page);
            let state = self
                .navigate_and_wait(&url, listings::LISTING_LINK, Some(EMPTY_STATE))
                .await
                .inspect_err(|e| tracing::error!(page, url = %url, error = %e, "listings page failed to load"))?;

            if state == PageState::Empty {
                tracing::info!(page, "reached empty listings page, traversal complete");
                break;
            }

            let ids = self
                .read_listing_ids()
                .await
                .inspect_err(|e| tracing::error!(page, error = %e, "failed to read listing links"))?;
            let total = ids.len();
            tracing::info!(page, listings = total, "listings page loaded");

            for (i, id) in ids.iter().enumerate() {
                tracing::info!(page, listing_id = %id, position = i + 1, total, "processing listing");
                match self.extract_listing(id, range).await {
                    Ok(record) => collected.records.push(record),
                    Err(err) => self.handle_record_failure(id, err, &mut collected.skipped)?,
                }
            }
        }

        Ok(collected)
    }

    fn handle_record_failure(
        &self,
        id: &str,
        err: ScraperError,
        skipped: &mut Vec<SkippedListing>,
    ) -> Result<(), ScraperError> {
        if self.settings.record_failure_policy == RecordFailurePolicy::Abort
            || !err.is_record_scoped()
        {
            tracing::error!(listing_id = id, error = %err, "listing extraction failed, aborting run");
            return Err(err);
        }

        tracing::warn!(listing_id = id, error = %err, "listing extraction failed, skipping");
        skipped.push(SkippedListing {
            id: id.to_owned(),
            reason: err.to_string(),
        });
        Ok(())
    }

    /// Listing ids from the link hrefs on the current page, in page order
    /// and without duplicates.
    async fn read_listing_ids(&self) -> Result<Vec<String>, ScraperError> {
        self.wait_for_elements(listings::LISTING_LINK, Visibility::Interactive, "listing links")
            .await?;

        let browser = self.browser;
        let hrefs = self
            .read_with_retry(move || async move {
                let links = browser.find_all(listings::LISTING_LINK).await?;
                let mut hrefs = Vec::with_capacity(links.len());
                for link in &links {
                    if let Some(href) = link.attr("href").await? {
                        hrefs.push(href);
                    }
                }
                Ok::<_, ScraperError>(hrefs)
            })
            .await?;

        let mut ids: Vec<String> = Vec::with_capacity(hrefs.len());
        for href in hrefs {
            match listing_id_from_href(&href) {
                Some(id) if !ids.contains(&id) => ids.push(id),
                Some(_) => {}
                None => tracing::warn!(href = %href, "listing link has no id, ignoring"),
            }
        }
        Ok(ids)
    }
}

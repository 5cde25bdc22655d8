//! Shop-wide search analytics table.

use chrono::NaiveDate;
use etsy_stats_core::{DateRange, SearchQueryAnalytics};

use crate::browser::{Browser, Element};
use crate::error::ScraperError;
use crate::parse::extract_number;
use crate::selectors::{analytics, EMPTY_STATE};
use crate::urls;

use super::navigation::PageState;
use super::read::child_text;
use super::EtsyScraper;

impl<B: Browser> EtsyScraper<'_, B> {
    /// Reads every page of the search analytics table for `range`.
    ///
    /// `today` anchors rolling windows such as the last 30 days. An empty
    /// table yields an empty vec.
    ///
    /// # Errors
    ///
    /// Any page-load, row-read, or pagination failure aborts the run.
    pub async fn collect_search_analytics(
        &self,
        range: DateRange,
        today: NaiveDate,
    ) -> Result<Vec<SearchQueryAnalytics>, ScraperError> {
        let url = urls::search_analytics(range, today);
        let state = self
            .navigate_and_wait(&url, analytics::FIRST_QUERY_CELL, Some(EMPTY_STATE))
            .await?;
        if state == PageState::Empty {
            tracing::info!(range = %range, "search analytics table is empty");
            return Ok(Vec::new());
        }

        let browser = self.browser;
        let mut rows = Vec::new();
        let mut page = 0usize;

        loop {
            page += 1;
            if page > self.settings.max_pages {
                return Err(self.pagination_limit("search analytics"));
            }

            tracing::info!(page, "reading search analytics page");
            let page_rows = self
                .read_with_retry(move || read_analytics_page(browser))
                .await
                .inspect_err(|e| tracing::error!(page, error = %e, "failed to read search analytics page"))?;
            rows.extend(page_rows);

            if !self.advance_page("", analytics::FIRST_QUERY_CELL).await? {
                break;
            }
        }

        tracing::info!(rows = rows.len(), pages = page, "search analytics collected");
        Ok(rows)
    }
}

async fn read_analytics_page<B: Browser>(
    browser: &B,
) -> Result<Vec<SearchQueryAnalytics>, ScraperError> {
    let rows = browser.find_all(analytics::TABLE_ROW).await?;
    let mut out = Vec::with_capacity(rows.len());

    for row in &rows {
        out.push(read_analytics_row(row).await?);
    }

    Ok(out)
}

async fn read_analytics_row<E: Element>(row: &E) -> Result<SearchQueryAnalytics, ScraperError> {
    let conversion_rate = child_text(row, analytics::CONVERSION_RATE_CELL, "conversion rate").await?;
    let revenue = child_text(row, analytics::REVENUE_CELL, "revenue").await?;

    Ok(SearchQueryAnalytics {
        search_query: child_text(row, analytics::SEARCH_QUERY_CELL, "search query").await?,
        impressions: child_text(row, analytics::IMPRESSIONS_CELL, "impressions").await?,
        position: child_text(row, analytics::POSITION_CELL, "position").await?,
        visits: child_text(row, analytics::VISITS_CELL, "visits").await?,
        conversion_rate: extract_number(&conversion_rate).unwrap_or_default(),
        revenue: extract_number(&revenue).unwrap_or_default(),
        listings: child_text(row, analytics::LISTINGS_CELL, "listings").await?,
    })
}

use etsy_stats_core::{DateRange, ListingRecord, SearchTermObservation, TrafficSources};
use rust_decimal::Decimal;

use crate::browser::{Browser, Element};
use crate::error::ScraperError;
use crate::parse::{extract_number, parse_count, parse_decimal, parse_decimal_token};
use crate::scraper::read::{child_text, first_element, first_text, missing, optional_child_text};
use crate::scraper::wait::Visibility;
use crate::scraper::EtsyScraper;
use crate::selectors::stats;
use crate::urls;

struct HeadlineMetrics {
    visits: Decimal,
    total_views: Decimal,
    orders: Decimal,
    revenue: Decimal,
}

impl<B: Browser> EtsyScraper<'_, B> {
    pub(super) async fn statistics_pass(
        &self,
        record: &mut ListingRecord,
        range: DateRange,
    ) -> Result<(), ScraperError> {
        let url = urls::listing_stats(&record.id, range);
        self.navigate_and_wait(&url, stats::TITLE, None).await?;

        let browser = self.browser;
        let photo_selector = stats::title_photo(&record.id);
        let photo = photo_selector.as_str();

        let (title, photo_url) = self
            .read_with_retry(move || async move {
                let title = first_text(browser, stats::TITLE, "listing title").await?;
                let image = first_element(browser, photo, "listing photo").await?;
                let src = image
                    .attr("src")
                    .await?
                    .ok_or_else(|| missing("listing photo src", photo))?;
                Ok::<_, ScraperError>((title, src))
            })
            .await?;
        record.title = title;
        record.photo_url = photo_url;

        let metrics = self
            .read_with_retry(move || read_headline_metrics(browser))
            .await?;
        record.visits = metrics.visits;
        record.total_views = metrics.total_views;
        record.orders = metrics.orders;
        record.revenue = metrics.revenue;

        record.traffic = self
            .read_with_retry(move || read_traffic_sources(browser))
            .await?;

        record.search_terms = self.read_search_terms(&record.id).await?;

        tracing::debug!(
            listing_id = %record.id,
            search_terms = record.search_terms.len(),
            "statistics pass complete"
        );
        Ok(())
    }

    /// Reads every page of the search-term table. The table itself must
    /// render; a table with no rows has no pager to follow.
    async fn read_search_terms(
        &self,
        listing_id: &str,
    ) -> Result<Vec<SearchTermObservation>, ScraperError> {
        self.wait_for_elements(stats::SEARCH_TERMS_TABLE, Visibility::Present, "search terms table")
            .await?;

        let browser = self.browser;
        let mut terms = Vec::new();
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > self.settings.max_pages {
                return Err(self.pagination_limit(format!("search terms of listing {listing_id}")));
            }

            let page = self
                .read_with_retry(move || read_search_term_page(browser))
                .await?;
            if page.is_empty() {
                break;
            }
            terms.extend(page);

            if !self
                .advance_page(stats::SEARCH_TERMS_PAGINATION, stats::SEARCH_TERM_ANCHOR)
                .await?
            {
                break;
            }
        }

        Ok(terms)
    }
}

async fn read_headline_metrics<B: Browser>(browser: &B) -> Result<HeadlineMetrics, ScraperError> {
    let dropdown = first_element(
        browser,
        stats::GENERAL_DATA_DROPDOWN,
        "general data dropdown",
    )
    .await?;

    let revenue_selector = stats::headline_metric(stats::REVENUE_LABEL);
    let revenue_raw = child_text(&dropdown, &revenue_selector, stats::REVENUE_LABEL).await?;

    Ok(HeadlineMetrics {
        visits: headline_metric(&dropdown, stats::VISITS_LABEL).await?,
        total_views: headline_metric(&dropdown, stats::TOTAL_VIEWS_LABEL).await?,
        orders: headline_metric(&dropdown, stats::ORDERS_LABEL).await?,
        revenue: parse_decimal_token(stats::REVENUE_LABEL, &revenue_raw)?,
    })
}

async fn headline_metric<E: Element>(dropdown: &E, label: &str) -> Result<Decimal, ScraperError> {
    let selector = stats::headline_metric(label);
    let raw = child_text(dropdown, &selector, label).await?;
    parse_decimal(label, &raw)
}

async fn read_traffic_sources<B: Browser>(browser: &B) -> Result<TrafficSources, ScraperError> {
    let list = first_element(browser, stats::TRAFFIC_SOURCES_LIST, "traffic sources list").await?;

    Ok(TrafficSources {
        direct_and_other: traffic_share(&list, stats::DIRECT_AND_OTHER_LABEL).await?,
        etsy_app_and_other_pages: traffic_share(&list, stats::ETSY_APP_AND_OTHER_PAGES_LABEL)
            .await?,
        etsy_ads: traffic_share(&list, stats::ETSY_ADS_LABEL).await?,
        etsy_marketing_and_seo: traffic_share(&list, stats::ETSY_MARKETING_AND_SEO_LABEL).await?,
        social_media: traffic_share(&list, stats::SOCIAL_MEDIA_LABEL).await?,
        etsy_search: traffic_share(&list, stats::ETSY_SEARCH_LABEL).await?,
    })
}

/// Percentage for one source. The dashboard omits sources with no visits,
/// so absence reads as zero.
async fn traffic_share<E: Element>(list: &E, label: &str) -> Result<Decimal, ScraperError> {
    let selector = stats::traffic_source(label);
    match optional_child_text(list, &selector).await? {
        Some(text) => match extract_number(&text) {
            Some(token) => parse_decimal(label, &token),
            None => Ok(Decimal::ZERO),
        },
        None => Ok(Decimal::ZERO),
    }
}

async fn read_search_term_page<B: Browser>(
    browser: &B,
) -> Result<Vec<SearchTermObservation>, ScraperError> {
    let rows = browser.find_all(stats::SEARCH_TERM_ROW).await?;
    let mut terms = Vec::with_capacity(rows.len());

    for row in &rows {
        let name = child_text(row, stats::SEARCH_TERM_NAME_CELL, "search term").await?;

        // Split rows carry Etsy / Google / Total sub-columns; plain rows one.
        let split = !row
            .find_all(stats::SEARCH_TERM_TOTAL_VISITS_CELL)
            .await?
            .is_empty();
        let visits_cell = if split {
            stats::SEARCH_TERM_TOTAL_VISITS_CELL
        } else {
            stats::SEARCH_TERM_VISITS_CELL
        };
        let raw = child_text(row, visits_cell, "search term visits").await?;

        terms.push(SearchTermObservation {
            visits: parse_count("search term visits", &raw)?,
            name,
        });
    }

    Ok(terms)
}

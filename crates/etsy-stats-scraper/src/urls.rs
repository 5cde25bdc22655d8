//! Storefront URLs visited by the scraper.

use chrono::NaiveDate;
use etsy_stats_core::DateRange;

const ETSY_ORIGIN: &str = "https://www.etsy.com";

/// One page of the seller's listings manager, stats columns enabled.
#[must_use]
pub fn listings_page(page: usize) -> String {
    format!("{ETSY_ORIGIN}/your/shops/me/tools/listings/page:{page},stats:true")
}

/// Public listing page; this is the canonical link stored on a record.
#[must_use]
pub fn listing(id: &str) -> String {
    format!("{ETSY_ORIGIN}/listing/{id}")
}

#[must_use]
pub fn listing_stats(id: &str, range: DateRange) -> String {
    format!(
        "{ETSY_ORIGIN}/your/shops/me/stats/listings/{id}?{}",
        range.stats_query()
    )
}

#[must_use]
pub fn listing_edit(id: &str) -> String {
    format!("{ETSY_ORIGIN}/your/shops/me/listing-editor/edit/{id}")
}

/// Shop-wide search analytics. Ranges without an analytics window load the
/// page default.
#[must_use]
pub fn search_analytics(range: DateRange, today: NaiveDate) -> String {
    let base = format!("{ETSY_ORIGIN}/your/shops/me/search-analytics");
    match range.analytics_query(today) {
        Some(query) => format!("{base}?{query}"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listings_page_embeds_page_number() {
        assert_eq!(
            listings_page(3),
            "https://www.etsy.com/your/shops/me/tools/listings/page:3,stats:true"
        );
    }

    #[test]
    fn all_time_stats_url_has_single_question_mark() {
        let url = listing_stats("99", DateRange::AllTime);
        assert_eq!(
            url,
            "https://www.etsy.com/your/shops/me/stats/listings/99?date_range=all_time"
        );
        assert_eq!(url.matches('?').count(), 1);
    }

    #[test]
    fn search_analytics_without_window_has_no_query() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            search_analytics(DateRange::AllTime, today),
            "https://www.etsy.com/your/shops/me/search-analytics"
        );
        assert!(search_analytics(DateRange::ThisYear, today).ends_with("?dateRange=this-year"));
    }
}

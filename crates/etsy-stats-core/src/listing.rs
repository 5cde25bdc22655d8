use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share of visits per traffic source, in percent, as shown on the stats page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSources {
    pub direct_and_other: Decimal,
    pub etsy_app_and_other_pages: Decimal,
    pub etsy_ads: Decimal,
    pub etsy_marketing_and_seo: Decimal,
    pub social_media: Decimal,
    pub etsy_search: Decimal,
}

/// One row of a listing's search-term table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTermObservation {
    pub name: String,
    pub visits: u64,
}

/// Merged statistics and metadata for one listing.
///
/// Built by the statistics pass and then the edit pass. Conversion and click
/// rates are derived on demand and cannot be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub link: String,
    pub photo_url: String,
    pub title: String,
    pub visits: Decimal,
    pub total_views: Decimal,
    pub orders: Decimal,
    pub revenue: Decimal,
    pub traffic: TrafficSources,
    pub search_terms: Vec<SearchTermObservation>,
    pub tags: Vec<String>,
    /// Category breadcrumb joined with `" / "`. Empty when the listing has none.
    pub category: String,
    pub shop_section: Option<String>,
    pub sku: Option<String>,
    pub listed_date: Option<String>,
    pub shipping_profile: Option<String>,
}

impl ListingRecord {
    /// Creates an empty record with only identity and link populated.
    #[must_use]
    pub fn new(id: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link: link.into(),
            photo_url: String::new(),
            title: String::new(),
            visits: Decimal::ZERO,
            total_views: Decimal::ZERO,
            orders: Decimal::ZERO,
            revenue: Decimal::ZERO,
            traffic: TrafficSources::default(),
            search_terms: Vec::new(),
            tags: Vec::new(),
            category: String::new(),
            shop_section: None,
            sku: None,
            listed_date: None,
            shipping_profile: None,
        }
    }

    /// `orders / visits * 100`, rounded to 2 places; zero when there are no
    /// visits or the ratio does not fit a `Decimal`.
    #[must_use]
    pub fn conversion_rate(&self) -> Decimal {
        percent(self.orders, self.visits)
    }

    /// `visits / total_views * 100`, rounded to 2 places; zero when there are
    /// no views or the ratio does not fit a `Decimal`.
    #[must_use]
    pub fn click_rate(&self) -> Decimal {
        percent(self.visits, self.total_views)
    }
}

fn percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |pct| pct.round_dp(2))
}

/// Summed visits for one search term across all listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTermTotal {
    pub name: String,
    pub total_visits: u64,
}

/// Number of listings using one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsage {
    pub name: String,
    pub usage_count: u64,
}

/// A listing that failed extraction and was left out of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedListing {
    pub id: String,
    pub reason: String,
}

/// Output of one collection run: accepted records plus both rollups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStatistic {
    pub records: Vec<ListingRecord>,
    pub search_terms: Vec<SearchTermTotal>,
    pub tags: Vec<TagUsage>,
    pub skipped: Vec<SkippedListing>,
}

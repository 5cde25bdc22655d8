//! Fake seller-dashboard pages built from the crate's selectors.

use etsy_stats_core::DateRange;
use etsy_stats_scraper::selectors::{analytics, edit, listings, stats, EMPTY_STATE, NEXT_PAGE_BUTTON};
use etsy_stats_scraper::urls;

use super::{FakeBrowser, FakeNode, FakePage, FakeView};

#[derive(Clone)]
pub enum TermVisits {
    Single(&'static str),
    Split {
        etsy: &'static str,
        google: &'static str,
        total: &'static str,
    },
}

/// Everything one listing shows across its stats and edit pages.
#[derive(Clone)]
pub struct ListingFixture {
    pub id: String,
    pub title: String,
    pub visits: String,
    pub total_views: String,
    pub orders: String,
    pub revenue: String,
    pub traffic: Vec<(&'static str, &'static str)>,
    pub term_pages: Vec<Vec<(&'static str, TermVisits)>>,
    pub tags: Vec<&'static str>,
    pub category: Vec<&'static str>,
    pub shop_section: Option<&'static str>,
    pub sku: Option<&'static str>,
    /// Whether the search-term table renders at all.
    pub terms_table: bool,
}

impl ListingFixture {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: format!("Listing {id}"),
            visits: "100".to_owned(),
            total_views: "400".to_owned(),
            orders: "2".to_owned(),
            revenue: "$50.00".to_owned(),
            traffic: vec![
                (stats::ETSY_SEARCH_LABEL, "60%"),
                (stats::DIRECT_AND_OTHER_LABEL, "40%"),
            ],
            term_pages: vec![vec![("metal art", TermVisits::Single("10"))]],
            tags: vec!["metal", "decor"],
            category: vec!["Home & Living", "Wall Decor"],
            shop_section: Some("Wall Art"),
            sku: None,
            terms_table: true,
        }
    }

    pub fn with_terms(mut self, pages: Vec<Vec<(&'static str, TermVisits)>>) -> Self {
        self.term_pages = pages;
        self
    }

    pub fn with_tags(mut self, tags: Vec<&'static str>) -> Self {
        self.tags = tags;
        self
    }

    pub fn photo_url(&self) -> String {
        format!("https://i.etsystatic.com/{}/il_170x135.jpg", self.id)
    }
}

pub fn listing_href(id: &str) -> String {
    format!("https://www.etsy.com/your/shops/me/listing-editor/edit/{id}?ref=listings_manager")
}

pub fn listings_page(ids: &[&str]) -> FakePage {
    let links = ids
        .iter()
        .map(|id| FakeNode::new().with_attr("href", listing_href(id)))
        .collect();
    FakePage::new(FakeView::new().with_all(listings::LISTING_LINK, links))
}

pub fn empty_state_page() -> FakePage {
    FakePage::new(FakeView::new().with(EMPTY_STATE, FakeNode::new()))
}

fn term_row(name: &str, visits: &TermVisits) -> FakeNode {
    let row = FakeNode::new().with_child(stats::SEARCH_TERM_NAME_CELL, FakeNode::text(name));
    match visits {
        TermVisits::Single(v) => row.with_child(stats::SEARCH_TERM_VISITS_CELL, FakeNode::text(*v)),
        TermVisits::Split {
            etsy,
            google,
            total,
        } => row
            .with_child(stats::SEARCH_TERM_VISITS_CELL, FakeNode::text(*etsy))
            .with_child("td/div/div[1]/div[2]/div[2]", FakeNode::text(*google))
            .with_child(stats::SEARCH_TERM_TOTAL_VISITS_CELL, FakeNode::text(*total)),
    }
}

pub fn stats_page(listing: &ListingFixture) -> FakePage {
    let dropdown = FakeNode::new()
        .with_child(
            stats::headline_metric(stats::VISITS_LABEL),
            FakeNode::text(&listing.visits),
        )
        .with_child(
            stats::headline_metric(stats::TOTAL_VIEWS_LABEL),
            FakeNode::text(&listing.total_views),
        )
        .with_child(
            stats::headline_metric(stats::ORDERS_LABEL),
            FakeNode::text(&listing.orders),
        )
        .with_child(
            stats::headline_metric(stats::REVENUE_LABEL),
            FakeNode::text(&listing.revenue),
        );

    let traffic = listing
        .traffic
        .iter()
        .fold(FakeNode::new(), |list, (label, share)| {
            list.with_child(stats::traffic_source(label), FakeNode::text(*share))
        });

    let mut base = FakeView::new()
        .with(stats::TITLE, FakeNode::text(format!("  {}  ", listing.title)))
        .with(
            stats::title_photo(&listing.id),
            FakeNode::new().with_attr("src", listing.photo_url()),
        )
        .with(stats::GENERAL_DATA_DROPDOWN, dropdown)
        .with(stats::TRAFFIC_SOURCES_LIST, traffic);
    if listing.terms_table {
        base = base.with(stats::SEARCH_TERMS_TABLE, FakeNode::new());
    }

    let pages = if listing.term_pages.is_empty() {
        vec![Vec::new()]
    } else {
        listing.term_pages.clone()
    };
    let last = pages.len() - 1;
    let next_button = format!("{}{NEXT_PAGE_BUTTON}", stats::SEARCH_TERMS_PAGINATION);

    let views = pages
        .iter()
        .enumerate()
        .map(|(i, rows)| {
            let mut view = base
                .clone()
                .with_all(
                    stats::SEARCH_TERM_ROW,
                    rows.iter().map(|(name, visits)| term_row(name, visits)).collect(),
                );
            if let Some((first, _)) = rows.first() {
                view = view.with(stats::SEARCH_TERM_ANCHOR, FakeNode::text(*first));
            }
            if pages.len() > 1 {
                let button = if i < last {
                    FakeNode::new().advancing()
                } else {
                    FakeNode::new().disabled()
                };
                view = view.with(next_button.clone(), button);
            }
            view
        })
        .collect();

    FakePage::paged(views)
}

pub fn edit_page(listing: &ListingFixture) -> FakePage {
    let mut select = FakeNode::new().with_child(edit::SHOP_SECTION_OPTION, FakeNode::text("None"));
    if let Some(section) = listing.shop_section {
        select = select.with_child(edit::SHOP_SECTION_OPTION, FakeNode::text(section).selected());
    }

    let mut view = FakeView::new()
        .with(edit::SHOP_SECTION, select)
        .with_all(
            edit::TAG,
            listing.tags.iter().map(|t| FakeNode::text(*t)).collect(),
        )
        .with_all(
            edit::CATEGORY,
            listing.category.iter().map(|c| FakeNode::text(*c)).collect(),
        );
    if let Some(sku) = listing.sku {
        view = view.with(edit::SKU_INPUT, FakeNode::new().with_attr("value", sku));
    }
    FakePage::new(view)
}

/// Registers both per-listing pages for `range`.
pub fn with_listing(browser: FakeBrowser, listing: &ListingFixture, range: DateRange) -> FakeBrowser {
    browser
        .with_page(urls::listing_stats(&listing.id, range), stats_page(listing))
        .with_page(urls::listing_edit(&listing.id), edit_page(listing))
}

/// One search analytics row: query, impressions, position, visits,
/// conversion rate, revenue, listings.
pub type AnalyticsRow = [&'static str; 7];

pub fn analytics_page(pages: &[Vec<AnalyticsRow>]) -> FakePage {
    let last = pages.len().saturating_sub(1);
    let next_button = NEXT_PAGE_BUTTON.to_owned();
    let views = pages
        .iter()
        .enumerate()
        .map(|(i, rows)| {
            let nodes = rows
                .iter()
                .map(|cells| {
                    FakeNode::new()
                        .with_child(analytics::SEARCH_QUERY_CELL, FakeNode::text(cells[0]))
                        .with_child(analytics::IMPRESSIONS_CELL, FakeNode::text(cells[1]))
                        .with_child(analytics::POSITION_CELL, FakeNode::text(cells[2]))
                        .with_child(analytics::VISITS_CELL, FakeNode::text(cells[3]))
                        .with_child(analytics::CONVERSION_RATE_CELL, FakeNode::text(cells[4]))
                        .with_child(analytics::REVENUE_CELL, FakeNode::text(cells[5]))
                        .with_child(analytics::LISTINGS_CELL, FakeNode::text(cells[6]))
                })
                .collect();
            let mut view = FakeView::new().with_all(analytics::TABLE_ROW, nodes);
            if let Some(first) = rows.first() {
                view = view.with(analytics::FIRST_QUERY_CELL, FakeNode::text(first[0]));
            }
            let button = if i < last {
                FakeNode::new().advancing()
            } else {
                FakeNode::new().disabled()
            };
            view.with(next_button.clone(), button)
        })
        .collect();
    FakePage::paged(views)
}

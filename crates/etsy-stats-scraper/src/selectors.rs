//! XPath selectors for the seller dashboard.
//!
//! These track the live site markup and break whenever it changes. Paths
//! that start with `//` are document-wide; the rest are evaluated relative
//! to an element handle.

/// Title of the "next page" button shared by every paginated table.
pub const NEXT_PAGE_BUTTON: &str = "//button[@title='Next page']";

/// Empty-state panel shown past the last page of a listing or analytics view.
pub const EMPTY_STATE: &str = "//div[contains(@class, 'empty-state')]";

pub mod listings {
    pub const LISTING_LINK: &str = "//div[contains(@class, 'list-region')]/div/div/ul/li/div/a";
}

pub mod stats {
    pub const TITLE: &str = "//div[contains(@class, 'stats-page-list')]/div/div/div[2]/div[1]/div/div/div/div/div/div/div[2]/div[1]/div[1]/div/span";

    pub const GENERAL_DATA_DROPDOWN: &str =
        "//div[contains(@class, 'stats-page-list')]/div/div/div[4]//div[contains(@class, 'dropdown')]//ul";

    pub const TRAFFIC_SOURCES_LIST: &str =
        "//div[contains(@class, 'stats-page-list')]//div/div/div[5]/div[1]/div[2]/div/div/div/div/div/ol";

    pub const VISITS_LABEL: &str = "Visits";
    pub const TOTAL_VIEWS_LABEL: &str = "Total Views";
    pub const ORDERS_LABEL: &str = "Orders";
    pub const REVENUE_LABEL: &str = "Revenue";

    pub const DIRECT_AND_OTHER_LABEL: &str = "Direct & other traffic";
    pub const ETSY_APP_AND_OTHER_PAGES_LABEL: &str = "Etsy app & other Etsy pages";
    pub const ETSY_ADS_LABEL: &str = "Etsy Ads";
    pub const ETSY_MARKETING_AND_SEO_LABEL: &str = "Etsy marketing & SEO";
    pub const SOCIAL_MEDIA_LABEL: &str = "Social media";
    pub const ETSY_SEARCH_LABEL: &str = "Etsy search";

    /// Value cell of one headline metric, relative to the general-data dropdown.
    #[must_use]
    pub fn headline_metric(label: &str) -> String {
        format!("li/span/span[contains(text(), '{label}')]/../div")
    }

    /// Percentage cell of one traffic source, relative to the sources list.
    #[must_use]
    pub fn traffic_source(label: &str) -> String {
        format!(".//span[contains(text(), '{label}')]/../../../../../div[2]/span[2]")
    }

    /// Thumbnail of the listing in the stats header.
    #[must_use]
    pub fn title_photo(id: &str) -> String {
        format!(
            "//*[@id='mission-control-listing-stats']//a[contains(@href, '{id}')]//img[contains(@src, '170x135')]"
        )
    }

    pub const SEARCH_TERMS_TABLE: &str = "//table[@id='horizontal-chart4']";

    pub const SEARCH_TERM_ROW: &str =
        "//table[@id='horizontal-chart4']//tr[not(contains(@class, 'column-header'))]";

    /// Wrapper two levels above the table; the table's pager lives here.
    pub const SEARCH_TERMS_PAGINATION: &str = "//table[@id='horizontal-chart4']/../..";

    /// Name cell of the first data row; its text changes on every page turn.
    pub const SEARCH_TERM_ANCHOR: &str =
        "(//table[@id='horizontal-chart4']//tr[not(contains(@class, 'column-header'))])[1]/td/div/div[1]/div[1]/span[1]";

    // Row-relative cells.
    pub const SEARCH_TERM_NAME_CELL: &str = "td/div/div[1]/div[1]/span[1]";
    /// Third visits sub-column; only present when visits are split into
    /// Etsy / Google / Total.
    pub const SEARCH_TERM_TOTAL_VISITS_CELL: &str = "td/div/div[1]/div[2]/div[3]";
    pub const SEARCH_TERM_VISITS_CELL: &str = "td/div/div[1]/div[2]/div[1]";
}

pub mod edit {
    pub const TAG: &str = "//*[@id='field-tags']/ul/li/button";
    pub const CATEGORY: &str =
        "//*[@id='field-category']//span[@data-test-id='seller-taxonomy-path-name']";
    pub const SHOP_SECTION: &str = "//*[@id='shop-section-select']";
    /// Relative to the shop-section select.
    pub const SHOP_SECTION_OPTION: &str = "option";
    pub const SKU_INPUT: &str = "//*[@id='field-sku']//input";
    pub const LISTED_DATE: &str = "//*[@id='listing-status']//span[@data-test-id='listing-created-date']";
    pub const SHIPPING_PROFILE: &str =
        "//*[@id='field-shipping']//span[@data-test-id='shipping-profile-name']";
}

pub mod analytics {
    pub const TABLE_ROW: &str = "//*[@id='main-content']/div/div[3]/div/table/tbody/tr";

    /// Query cell of the first row; the content and page-turn anchor.
    pub const FIRST_QUERY_CELL: &str =
        "//*[@id='main-content']/div/div[3]/div/table/tbody/tr[1]/td[1]/a/span[2]";

    // Row-relative cells.
    pub const SEARCH_QUERY_CELL: &str = "td[1]/a/span[2]";
    pub const IMPRESSIONS_CELL: &str = "td[2]";
    pub const POSITION_CELL: &str = "td[3]";
    pub const VISITS_CELL: &str = "td[4]";
    pub const CONVERSION_RATE_CELL: &str = "td[5]";
    pub const REVENUE_CELL: &str = "td[6]";
    pub const LISTINGS_CELL: &str = "td[7]/span/a";
}

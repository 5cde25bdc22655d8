//! Static column tables for every publishable row type.
//!
//! A column is `{name, order, value}`. Tables are sorted by `order` before
//! use, so declaration order does not matter.

use etsy_stats_core::{ListingRecord, SearchQueryAnalytics, SearchTermTotal, TagUsage};
use rust_decimal::Decimal;
use serde_json::Value;

/// One cell as sent with `valueInputOption=USER_ENTERED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
    Count(u64),
    /// Evaluated by Sheets; must start with `=`.
    Formula(String),
    Empty,
}

impl CellValue {
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Text(s) | CellValue::Formula(s) => Value::String(s.clone()),
            CellValue::Number(d) => Value::String(d.normalize().to_string()),
            CellValue::Count(n) => Value::from(*n),
            CellValue::Empty => Value::String(String::new()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_owned())
    }
}

impl From<Option<&str>> for CellValue {
    fn from(s: Option<&str>) -> Self {
        s.map_or(CellValue::Empty, CellValue::from)
    }
}

pub struct Column<T> {
    pub name: &'static str,
    pub order: u16,
    pub value: fn(&T) -> CellValue,
}

/// A type that can be written as one spreadsheet row.
pub trait SheetRow: Sized {
    /// Column table in any order; callers sort by [`Column::order`].
    fn columns() -> Vec<Column<Self>>;
}

fn sorted_columns<T: SheetRow>() -> Vec<Column<T>> {
    let mut columns = T::columns();
    columns.sort_by_key(|c| c.order);
    columns
}

/// Header row followed by one row per item, ready for a values update.
#[must_use]
pub fn to_values<T: SheetRow>(rows: &[T]) -> Vec<Vec<Value>> {
    let columns = sorted_columns::<T>();
    let header = columns
        .iter()
        .map(|c| Value::String(c.name.to_owned()))
        .collect();

    std::iter::once(header)
        .chain(
            rows.iter()
                .map(|row| columns.iter().map(|c| (c.value)(row).to_json()).collect()),
        )
        .collect()
}

/// Number of columns `T` writes.
#[must_use]
pub fn width<T: SheetRow>() -> usize {
    T::columns().len()
}

fn image_formula(url: &str) -> CellValue {
    if url.is_empty() {
        return CellValue::Empty;
    }
    CellValue::Formula(format!("=IMAGE(\"{}\")", url.replace('"', "\"\"")))
}

fn search_terms_cell(record: &ListingRecord) -> CellValue {
    let joined = record
        .search_terms
        .iter()
        .map(|t| format!("{} ({})", t.name, t.visits))
        .collect::<Vec<_>>()
        .join("\n");
    CellValue::Text(joined)
}

impl SheetRow for ListingRecord {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column { name: "Photo", order: 0, value: |r| image_formula(&r.photo_url) },
            Column { name: "Link", order: 1, value: |r| CellValue::from(r.link.as_str()) },
            Column { name: "Title", order: 2, value: |r| CellValue::from(r.title.as_str()) },
            Column { name: "Visits", order: 3, value: |r| CellValue::Number(r.visits) },
            Column { name: "Total Views", order: 4, value: |r| CellValue::Number(r.total_views) },
            Column { name: "Orders", order: 5, value: |r| CellValue::Number(r.orders) },
            Column { name: "Revenue", order: 6, value: |r| CellValue::Number(r.revenue) },
            Column {
                name: "Conversion Rate",
                order: 7,
                value: |r| CellValue::Number(r.conversion_rate()),
            },
            Column { name: "Click Rate", order: 8, value: |r| CellValue::Number(r.click_rate()) },
            Column {
                name: "Direct & Other Traffic",
                order: 9,
                value: |r| CellValue::Number(r.traffic.direct_and_other),
            },
            Column {
                name: "Etsy App & Other Etsy Pages",
                order: 10,
                value: |r| CellValue::Number(r.traffic.etsy_app_and_other_pages),
            },
            Column { name: "Etsy Ads", order: 11, value: |r| CellValue::Number(r.traffic.etsy_ads) },
            Column {
                name: "Etsy Marketing & SEO",
                order: 12,
                value: |r| CellValue::Number(r.traffic.etsy_marketing_and_seo),
            },
            Column {
                name: "Social Media",
                order: 13,
                value: |r| CellValue::Number(r.traffic.social_media),
            },
            Column {
                name: "Etsy Search",
                order: 14,
                value: |r| CellValue::Number(r.traffic.etsy_search),
            },
            Column { name: "Category", order: 15, value: |r| CellValue::from(r.category.as_str()) },
            Column {
                name: "Shop Section",
                order: 16,
                value: |r| CellValue::from(r.shop_section.as_deref()),
            },
            Column { name: "SKU", order: 17, value: |r| CellValue::from(r.sku.as_deref()) },
            Column {
                name: "Listed Date",
                order: 18,
                value: |r| CellValue::from(r.listed_date.as_deref()),
            },
            Column {
                name: "Shipping Profile",
                order: 19,
                value: |r| CellValue::from(r.shipping_profile.as_deref()),
            },
            Column { name: "Search Terms", order: 20, value: search_terms_cell },
            Column { name: "Tags", order: 21, value: |r| CellValue::Text(r.tags.join(", ")) },
        ]
    }
}

impl SheetRow for SearchTermTotal {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column { name: "Search Term", order: 0, value: |t| CellValue::from(t.name.as_str()) },
            Column { name: "Visits", order: 1, value: |t| CellValue::Count(t.total_visits) },
        ]
    }
}

impl SheetRow for TagUsage {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column { name: "Tag", order: 0, value: |t| CellValue::from(t.name.as_str()) },
            Column { name: "Listings", order: 1, value: |t| CellValue::Count(t.usage_count) },
        ]
    }
}

impl SheetRow for SearchQueryAnalytics {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                name: "Search Query",
                order: 0,
                value: |a| CellValue::from(a.search_query.as_str()),
            },
            Column {
                name: "Impressions",
                order: 1,
                value: |a| CellValue::from(a.impressions.as_str()),
            },
            Column { name: "Position", order: 2, value: |a| CellValue::from(a.position.as_str()) },
            Column { name: "Visits", order: 3, value: |a| CellValue::from(a.visits.as_str()) },
            Column {
                name: "Conversion Rate",
                order: 4,
                value: |a| CellValue::from(a.conversion_rate.as_str()),
            },
            Column { name: "Revenue", order: 5, value: |a| CellValue::from(a.revenue.as_str()) },
            Column { name: "Listings", order: 6, value: |a| CellValue::from(a.listings.as_str()) },
        ]
    }
}

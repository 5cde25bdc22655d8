use serde::{Deserialize, Serialize};

/// One row of the shop-wide search analytics table.
///
/// Cells are kept as the trimmed page text; conversion rate and revenue are
/// reduced to their numeric token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQueryAnalytics {
    pub search_query: String,
    pub impressions: String,
    pub position: String,
    pub visits: String,
    pub conversion_rate: String,
    pub revenue: String,
    pub listings: String,
}

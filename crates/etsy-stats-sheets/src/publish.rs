//! Writes collected results into per-shop tabs.

use etsy_stats_core::{AggregateStatistic, SearchQueryAnalytics};

use crate::client::{a1_range, column_letter, SheetsClient};
use crate::columns::{to_values, width, SheetRow};
use crate::error::SheetsError;

/// Range cleared before every write.
const CLEAR_CELLS: &str = "A1:ZZ";

#[must_use]
pub fn stats_tab(shop: &str) -> String {
    format!("{shop} - Stats")
}

#[must_use]
pub fn search_terms_tab(shop: &str) -> String {
    format!("{shop} - Search Terms")
}

#[must_use]
pub fn tags_tab(shop: &str) -> String {
    format!("{shop} - Tags")
}

#[must_use]
pub fn analytics_tab(shop: &str) -> String {
    format!("{shop} - Analytics")
}

impl SheetsClient {
    /// Replaces the contents of `tab` with a header row plus `rows`,
    /// creating the tab first when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] if any Sheets call fails after retries.
    pub async fn publish_rows<T: SheetRow>(&self, tab: &str, rows: &[T]) -> Result<(), SheetsError> {
        self.ensure_tab(tab).await?;
        self.clear_range(&a1_range(tab, CLEAR_CELLS)).await?;

        let values = to_values(rows);
        let cells = format!("A1:{}{}", column_letter(width::<T>()), values.len());
        self.update_range(&a1_range(tab, &cells), values).await?;

        tracing::info!(tab, rows = rows.len(), "published tab");
        Ok(())
    }

    /// Publishes records, search-term rollup and tag rollup to the shop's
    /// three statistics tabs.
    ///
    /// # Errors
    ///
    /// Returns the first [`SheetsError`]; tabs already written stay written.
    pub async fn publish_statistic(
        &self,
        shop: &str,
        statistic: &AggregateStatistic,
    ) -> Result<(), SheetsError> {
        self.publish_rows(&stats_tab(shop), &statistic.records).await?;
        self.publish_rows(&search_terms_tab(shop), &statistic.search_terms)
            .await?;
        self.publish_rows(&tags_tab(shop), &statistic.tags).await
    }

    /// Publishes search analytics rows to the shop's analytics tab.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] if any Sheets call fails after retries.
    pub async fn publish_search_analytics(
        &self,
        shop: &str,
        rows: &[SearchQueryAnalytics],
    ) -> Result<(), SheetsError> {
        self.publish_rows(&analytics_tab(shop), rows).await
    }

    async fn ensure_tab(&self, tab: &str) -> Result<(), SheetsError> {
        let titles = self.list_tab_titles().await?;
        if titles.iter().any(|t| t == tab) {
            return Ok(());
        }
        tracing::debug!(tab, "tab missing, creating");
        self.add_tab(tab).await
    }
}

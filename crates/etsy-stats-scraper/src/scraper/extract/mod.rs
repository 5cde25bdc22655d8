//! Per-listing record extraction.
//!
//! A listing is built in two passes that always run in order: the
//! statistics page, then the edit page. A failure in either discards the
//! partial record.

mod edit;
mod statistics;

use etsy_stats_core::{DateRange, ListingRecord};

use crate::browser::Browser;
use crate::error::{ExtractionPass, ScraperError};
use crate::urls;

use super::EtsyScraper;

impl<B: Browser> EtsyScraper<'_, B> {
    /// Extracts one listing's statistics for `range` plus its edit-page
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::RecordExtraction`] naming the failed pass and
    /// wrapping the underlying cause.
    pub async fn extract_listing(
        &self,
        id: &str,
        range: DateRange,
    ) -> Result<ListingRecord, ScraperError> {
        let mut record = ListingRecord::new(id, urls::listing(id));

        self.statistics_pass(&mut record, range)
            .await
            .map_err(|e| extraction_failed(id, ExtractionPass::Statistics, e))?;
        self.edit_pass(&mut record)
            .await
            .map_err(|e| extraction_failed(id, ExtractionPass::Edit, e))?;

        Ok(record)
    }
}

fn extraction_failed(id: &str, pass: ExtractionPass, source: ScraperError) -> ScraperError {
    ScraperError::RecordExtraction {
        listing_id: id.to_owned(),
        pass,
        source: Box::new(source),
    }
}

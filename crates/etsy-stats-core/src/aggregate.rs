//! Rollups over a finished set of listing records.
//!
//! Both rollups group by exact string value (no case or whitespace folding),
//! sort by count descending, and keep first-encounter order between equal
//! counts. They are recomputed from scratch on every call.

use std::collections::HashMap;

use crate::listing::{
    AggregateStatistic, ListingRecord, SearchTermTotal, SkippedListing, TagUsage,
};

/// Builds the run output from accepted records and the ids that were skipped.
#[must_use]
pub fn aggregate(records: Vec<ListingRecord>, skipped: Vec<SkippedListing>) -> AggregateStatistic {
    let search_terms = rollup_search_terms(&records);
    let tags = rollup_tags(&records);
    AggregateStatistic {
        records,
        search_terms,
        tags,
        skipped,
    }
}

/// Sums visit counts per search-term name across all records.
#[must_use]
pub fn rollup_search_terms(records: &[ListingRecord]) -> Vec<SearchTermTotal> {
    let observations = records
        .iter()
        .flat_map(|r| r.search_terms.iter())
        .map(|term| (term.name.as_str(), term.visits));

    count_descending(observations)
        .into_iter()
        .map(|(name, total_visits)| SearchTermTotal { name, total_visits })
        .collect()
}

/// Counts how many times each tag appears across all records.
#[must_use]
pub fn rollup_tags(records: &[ListingRecord]) -> Vec<TagUsage> {
    let observations = records
        .iter()
        .flat_map(|r| r.tags.iter())
        .map(|tag| (tag.as_str(), 1));

    count_descending(observations)
        .into_iter()
        .map(|(name, usage_count)| TagUsage { name, usage_count })
        .collect()
}

/// Groups `(key, amount)` pairs by key, summing amounts, then stable-sorts
/// descending by total so ties stay in first-encounter order.
fn count_descending<'a, I>(observations: I) -> Vec<(String, u64)>
where
    I: Iterator<Item = (&'a str, u64)>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<(String, u64)> = Vec::new();

    for (key, amount) in observations {
        let next = totals.len();
        let i = *index.entry(key).or_insert(next);
        if i == next {
            totals.push((key.to_owned(), amount));
        } else {
            totals[i].1 = totals[i].1.saturating_add(amount);
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

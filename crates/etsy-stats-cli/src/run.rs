//! Command handlers: one browser session per run, publish only after a
//! complete traversal.

use std::fmt::Write as _;

use anyhow::Context;
use etsy_stats_core::{
    load_profile, save_profile, AggregateStatistic, AppConfig, DateRange, SearchQueryAnalytics,
    SkippedListing, UserProfile,
};
use etsy_stats_scraper::{run_in_session, EtsyScraper};
use etsy_stats_sheets::SheetsClient;

use crate::menu;

/// Rollup entries shown in a dry-run summary.
const SUMMARY_TOP: usize = 10;

/// Loads the saved profile, asking for the shop name and saving it on
/// first run.
pub(crate) fn resolve_profile(config: &AppConfig) -> anyhow::Result<UserProfile> {
    if let Some(profile) = load_profile(&config.profile_path)? {
        tracing::debug!(shop = %profile.shop, "loaded user profile");
        return Ok(profile);
    }

    let shop = menu::read_shop_name(&mut std::io::stdin().lock(), &mut std::io::stdout())?;
    let profile = UserProfile::new(shop);
    save_profile(&config.profile_path, &profile)?;
    tracing::info!(
        shop = %profile.shop,
        path = %config.profile_path.display(),
        "saved new user profile"
    );
    Ok(profile)
}

/// Builds the Sheets client up front so a missing credential fails before
/// the browser starts.
fn sheets_client(config: &AppConfig, dry_run: bool) -> anyhow::Result<Option<SheetsClient>> {
    if dry_run {
        return Ok(None);
    }
    let client = SheetsClient::new(&config.sheets).context("Sheets publishing is not configured")?;
    Ok(Some(client))
}

/// Collects every listing for `range`, aggregates, and publishes the three
/// statistics tabs (or prints a summary when `dry_run`).
///
/// # Errors
///
/// Returns an error if the browser session, traversal or publishing fails.
/// Listings skipped under the skip policy are reported, not errors.
pub(crate) async fn collect_statistics(
    config: &AppConfig,
    profile: &UserProfile,
    range: DateRange,
    dry_run: bool,
) -> anyhow::Result<()> {
    let sheets = sheets_client(config, dry_run)?;
    tracing::info!(shop = %profile.shop, range = %range, dry_run, "collecting listing statistics");

    let browser_config = config.browser.clone();
    let statistic = run_in_session(&config.browser, &profile.chrome_profile, move |browser| {
        Box::pin(async move {
            EtsyScraper::from_config(browser, &browser_config)
                .collect_statistic(range)
                .await
        })
    })
    .await
    .context("listing statistics collection failed")?;

    print_skipped(&statistic.skipped);

    match sheets {
        Some(client) => {
            client
                .publish_statistic(&profile.shop, &statistic)
                .await
                .context("failed to publish listing statistics")?;
            println!(
                "Published {} listings for {} ({}).",
                statistic.records.len(),
                profile.shop,
                range.label()
            );
        }
        None => print!("{}", statistic_summary(&statistic)),
    }
    Ok(())
}

/// Collects the shop-wide search analytics table for `range` and publishes
/// it (or prints a summary when `dry_run`).
///
/// # Errors
///
/// Returns an error if the browser session, collection or publishing fails.
pub(crate) async fn collect_analytics(
    config: &AppConfig,
    profile: &UserProfile,
    range: DateRange,
    dry_run: bool,
) -> anyhow::Result<()> {
    let sheets = sheets_client(config, dry_run)?;
    tracing::info!(shop = %profile.shop, range = %range, dry_run, "collecting search analytics");

    let today = chrono::Local::now().date_naive();
    let browser_config = config.browser.clone();
    let rows = run_in_session(&config.browser, &profile.chrome_profile, move |browser| {
        Box::pin(async move {
            EtsyScraper::from_config(browser, &browser_config)
                .collect_search_analytics(range, today)
                .await
        })
    })
    .await
    .context("search analytics collection failed")?;

    match sheets {
        Some(client) => {
            client
                .publish_search_analytics(&profile.shop, &rows)
                .await
                .context("failed to publish search analytics")?;
            println!(
                "Published {} search queries for {} ({}).",
                rows.len(),
                profile.shop,
                range.label()
            );
        }
        None => print!("{}", analytics_summary(&rows)),
    }
    Ok(())
}

fn print_skipped(skipped: &[SkippedListing]) {
    if skipped.is_empty() {
        return;
    }
    println!("Skipped {} listings:", skipped.len());
    for listing in skipped {
        println!("  {}: {}", listing.id, listing.reason);
    }
}

pub(crate) fn statistic_summary(statistic: &AggregateStatistic) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "dry-run: collected {} listings ({} skipped), {} search terms, {} tags",
        statistic.records.len(),
        statistic.skipped.len(),
        statistic.search_terms.len(),
        statistic.tags.len()
    );
    if !statistic.search_terms.is_empty() {
        let _ = writeln!(out, "Top search terms:");
        for term in statistic.search_terms.iter().take(SUMMARY_TOP) {
            let _ = writeln!(out, "  {} ({})", term.name, term.total_visits);
        }
    }
    if !statistic.tags.is_empty() {
        let _ = writeln!(out, "Top tags:");
        for tag in statistic.tags.iter().take(SUMMARY_TOP) {
            let _ = writeln!(out, "  {} ({})", tag.name, tag.usage_count);
        }
    }
    out
}

pub(crate) fn analytics_summary(rows: &[SearchQueryAnalytics]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "dry-run: collected {} search queries", rows.len());
    for row in rows.iter().take(SUMMARY_TOP) {
        let _ = writeln!(
            out,
            "  {}: {} impressions, {} visits",
            row.search_query, row.impressions, row.visits
        );
    }
    out
}

mod logging;
mod menu;
mod run;

use clap::{Parser, Subcommand};
use etsy_stats_core::DateRange;

#[derive(Debug, Parser)]
#[command(name = "etsy-stats")]
#[command(about = "Collect Etsy shop statistics and publish them to Google Sheets")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect per-listing statistics, aggregate them, and publish
    Collect {
        /// last-30-days, this-month, this-year, last-year or all-time
        #[arg(long, default_value = "last-30-days")]
        range: DateRange,

        /// Print a summary instead of publishing
        #[arg(long)]
        dry_run: bool,
    },
    /// Collect shop-wide search analytics and publish
    Analytics {
        /// last-30-days, this-month, this-year, last-year or all-time
        #[arg(long, default_value = "last-30-days")]
        range: DateRange,

        /// Print a summary instead of publishing
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = etsy_stats_core::load_app_config()?;
    let _log_guard = logging::init(&config)?;

    let profile = run::resolve_profile(&config)?;

    match cli.command {
        Some(Commands::Collect { range, dry_run }) => {
            run::collect_statistics(&config, &profile, range, dry_run).await
        }
        Some(Commands::Analytics { range, dry_run }) => {
            run::collect_analytics(&config, &profile, range, dry_run).await
        }
        None => menu::run_menu(&config, &profile).await,
    }
}

//! Interactive menu over any `BufRead`/`Write` pair.
//!
//! Every prompt gives the user a fixed number of attempts, then fails.

use std::io::{BufRead, Write};

use anyhow::bail;
use etsy_stats_core::{AppConfig, DateRange, UserProfile};

use crate::run;

pub(crate) const MAX_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    CollectStatistics,
    CollectAnalytics,
    Exit,
}

/// Asks `question` until `parse` accepts the trimmed answer.
///
/// # Errors
///
/// Fails when input ends or after [`MAX_ATTEMPTS`] rejected answers.
pub(crate) fn prompt<R, W, T, P>(
    input: &mut R,
    output: &mut W,
    question: &str,
    parse: P,
) -> anyhow::Result<T>
where
    R: BufRead,
    W: Write,
    P: Fn(&str) -> Option<T>,
{
    for attempt in 1..=MAX_ATTEMPTS {
        write!(output, "{question}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a valid answer was given");
        }
        let answer = line.trim();
        if let Some(value) = parse(answer) {
            return Ok(value);
        }

        tracing::debug!(attempt, answer, "rejected menu input");
        let left = MAX_ATTEMPTS - attempt;
        if left > 0 {
            writeln!(output, "Invalid choice '{answer}', {left} attempts left.")?;
        }
    }
    bail!("no valid answer after {MAX_ATTEMPTS} attempts")
}

pub(crate) fn read_menu_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<MenuChoice> {
    writeln!(output)?;
    writeln!(output, "1) Collect listing statistics")?;
    writeln!(output, "2) Collect search analytics")?;
    writeln!(output, "0) Exit")?;
    prompt(input, output, "Select an option: ", |answer| match answer {
        "1" => Some(MenuChoice::CollectStatistics),
        "2" => Some(MenuChoice::CollectAnalytics),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    })
}

/// Accepts a menu number or a range name such as `this-year`.
pub(crate) fn read_date_range<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<DateRange> {
    writeln!(output, "Date range:")?;
    for (i, range) in DateRange::ALL.iter().enumerate() {
        writeln!(output, "{}) {}", i + 1, range.label())?;
    }
    prompt(input, output, "Select a date range: ", |answer| {
        answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| DateRange::ALL.get(i).copied())
            .or_else(|| answer.parse().ok())
    })
}

pub(crate) fn read_shop_name<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<String> {
    prompt(input, output, "Etsy shop name: ", |answer| {
        (!answer.is_empty()).then(|| answer.to_owned())
    })
}

/// Runs menu actions until the user exits. A failed action is reported and
/// the menu continues.
pub(crate) async fn run_menu(config: &AppConfig, profile: &UserProfile) -> anyhow::Result<()> {
    loop {
        let choice = read_menu_choice(&mut std::io::stdin().lock(), &mut std::io::stdout())?;
        if choice == MenuChoice::Exit {
            tracing::info!("exiting");
            return Ok(());
        }

        let range = read_date_range(&mut std::io::stdin().lock(), &mut std::io::stdout())?;
        let result = if choice == MenuChoice::CollectStatistics {
            run::collect_statistics(config, profile, range, false).await
        } else {
            run::collect_analytics(config, profile, range, false).await
        };

        if let Err(e) = result {
            tracing::error!(error = %format!("{e:#}"), ?choice, range = %range, "menu action failed");
            println!("Action failed: {e}. See logs for details.");
        }
    }
}

//! Publishes collected statistics to a Google Sheets spreadsheet.
//!
//! Each publishable type declares a static column table ([`SheetRow`]);
//! [`SheetsClient`] turns rows into a cleared, freshly written tab.

pub mod client;
pub mod columns;
pub mod error;
pub mod publish;
mod retry;

pub use client::{a1_range, column_letter, SheetsClient};
pub use columns::{to_values, CellValue, Column, SheetRow};
pub use error::SheetsError;
pub use publish::{analytics_tab, search_terms_tab, stats_tab, tags_tab};

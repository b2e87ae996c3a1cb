//! Output formatting for subnet plans.
//!
//! This module handles formatting, exporting and re-reading plans:
//! - [`csv`] - CSV export and import
//! - [`json`] - JSON export and import
//! - [`terminal`] - Terminal output with colors

mod csv;
mod json;
mod terminal;

use chrono_tz::Tz;
use std::path::PathBuf;

pub use csv::{parse_csv, read_csv, to_csv, write_csv, CsvRow, CSV_HEADER};
pub use json::{parse_json, read_json, to_json, write_json};
pub use terminal::{format_field, print_report, render_plan, render_rows, render_table, thousands};

/// Default export file name, dated in the given timezone, e.g. `subnet_table_2024-05-01.csv`.
pub fn default_export_path(tz: Tz, extension: &str) -> PathBuf {
    let now = chrono::Utc::now().with_timezone(&tz);
    PathBuf::from(format!("subnet_table_{}.{extension}", now.format("%Y-%m-%d")))
}

//! Shared utilities for CLI commands

use chrono::NaiveDate;
use tabled::{Table, settings::Style};

/// Render an averaged grade, dropping the fraction when it is whole.
pub fn format_average(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Format an optional date for display.
pub fn format_date(date: Option<&NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

//! Database utility functions.

use chrono::{NaiveDate, Utc};

/// Today's date in UTC, used as the default grade date.
pub fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

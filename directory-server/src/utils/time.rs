//! Time helpers
//!
//! Stored timestamps are `i64` Unix millis; calendar dates are `YYYY-MM-DD`.

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Next value for a store-managed `updated_at`
///
/// Never returns a value at or below `previous`, even when two writes
/// land in the same millisecond.
pub fn next_update_millis(previous: i64) -> i64 {
    now_millis().max(previous + 1)
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("Invalid date format: {} (expected YYYY-MM-DD)", date))
            .with_detail("field", "date_of_joining")
    })
}

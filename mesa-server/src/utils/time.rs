//! Time helpers for the business timezone
//!
//! Date → timestamp conversion happens in the API layer; repositories only
//! see `i64` Unix millis.

use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_format(format!("Invalid date format: {} (expected YYYY-MM-DD)", date))
            .with_detail("value", date)
    })
}

/// Local midnight of `date` → Unix millis
///
/// DST gap fallback: if local midnight does not exist, use UTC midnight.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Next day's local midnight → Unix millis; use with `< end`
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

/// `[start, end)` millis range covering the business day
pub fn day_range_millis(date: NaiveDate, tz: Tz) -> (i64, i64) {
    (day_start_millis(date, tz), day_end_millis(date, tz))
}

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render millis in the business timezone (for log lines)
pub fn format_millis(millis: i64, tz: Tz) -> String {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

//! ISO date helpers.

use chrono::{Days, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date.
///
/// Timestamps such as `2024-01-05T08:00:00` or `2024-01-05 08:00:00` are
/// accepted and truncated to their date part.
#[must_use]
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let head = value.get(..10)?;
    if value.len() > 10 && !matches!(value.as_bytes()[10], b'T' | b' ') {
        return None;
    }
    NaiveDate::parse_from_str(head, ISO_FORMAT).ok()
}

/// Format a date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Signed day offset of `date` from `origin`.
#[must_use]
pub fn day_offset(origin: NaiveDate, date: NaiveDate) -> i64 {
    (date - origin).num_days()
}

/// Iterate every calendar date in `[start, end]`. Empty when `start > end`.
pub fn iter_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let count = if start > end {
        0
    } else {
        day_offset(start, end) as u64 + 1
    };
    (0..count).filter_map(move |i| start.checked_add_days(Days::new(i)))
}

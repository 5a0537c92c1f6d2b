//! Reference timezone and calendar date helpers.
//!
//! "Today" is always resolved in a fixed UTC+7 zone, independent of the
//! host's timezone. Calendar dates are stored and exchanged as timezone-neutral
//! `YYYY-MM-DD` values.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Offset of the reference timezone (UTC+7, Asia/Jakarta) in seconds
pub const REFERENCE_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// The fixed reference timezone
pub fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Calendar day of `now` in the reference timezone
pub fn today_in_reference(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&reference_offset()).date_naive()
}

/// Parse a calendar date from `YYYY-MM-DD` or a full RFC 3339 timestamp
///
/// Timestamps are reduced to their UTC calendar day.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

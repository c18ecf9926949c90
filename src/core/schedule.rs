use chrono::{NaiveDate, NaiveTime, ParseError};

/// Wire format for times of day
pub const TIME_FORMAT: &str = "%H:%M";

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a 24-hour `HH:MM` time, also accepting `HH:MM:SS` as stored by
/// SQL `TIME` columns
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, ParseError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
}

/// Parse an ISO-8601 `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Absolute distance between two clock readings on the same day, in seconds
///
/// Plain same-day arithmetic: 23:30 and 00:15 are 23h15m apart, not 45m.
#[inline]
pub fn seconds_apart(a: NaiveTime, b: NaiveTime) -> i64 {
    a.signed_duration_since(b).num_seconds().abs()
}

/// Whether two clock readings are at most `window_minutes` apart
#[inline]
pub fn within_minutes(a: NaiveTime, b: NaiveTime, window_minutes: i64) -> bool {
    seconds_apart(a, b) <= window_minutes * 60
}

/// Absolute number of days between two dates
#[inline]
pub fn days_apart(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days().abs()
}

/// Whether two dates are at most `window_days` apart
#[inline]
pub fn within_days(a: NaiveDate, b: NaiveDate, window_days: i64) -> bool {
    days_apart(a, b) <= window_days
}

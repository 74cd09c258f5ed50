//! Date and time helpers

use chrono::{DateTime, NaiveTime, Utc};

use crate::errors::ToolkitResult;

/// Midnight at the start of the moment's UTC day
pub fn start_of_day(moment: DateTime<Utc>) -> DateTime<Utc> {
    moment.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Whole calendar days from `start` to `end` (negative when reversed)
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    end.date_naive()
        .signed_duration_since(start.date_naive())
        .num_days()
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_rfc3339(input: &str) -> ToolkitResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(input)?.with_timezone(&Utc))
}

/// Compact sortable timestamp form, `YYYYMMDDHHMMSS`
pub fn format_compact(moment: DateTime<Utc>) -> String {
    moment.format("%Y%m%d%H%M%S").to_string()
}

//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a front-matter timestamp in various formats
///
/// Only the calendar position matters for ordering, so offsets are folded
/// into UTC and plain dates land on midnight.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Format a `YYYY-MM-DD[ time]` timestamp for display
///
/// # Examples
/// ```ignore
/// display_date("2024-01-15 10:30:00") // -> "2024年01月15日"
/// ```
///
/// Anything that does not split into three date parts is returned as is.
pub fn display_date(timestamp: &str) -> String {
    let date = timestamp.split(' ').next().unwrap_or_default();
    let parts: Vec<&str> = date.split('-').collect();

    match parts.as_slice() {
        [year, month, day] => format!("{}年{}月{}日", year, month, day),
        _ => timestamp.to_string(),
    }
}

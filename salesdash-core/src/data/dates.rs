//! Lenient date parsing for the `date` column.
//!
//! Accepts the common ISO, day-first and month-first shapes, optionally
//! followed by a time of day, plus RFC 3339 timestamps. Anything else is
//! `None`; callers store that as a missing date instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only patterns, tried in order. Day-first wins over month-first for
/// ambiguous slash dates such as `03/04/2024`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", " %H:%M", "T%H:%M:%S", "T%H:%M"];

/// Parse a date cell. Surrounding whitespace is ignored; empty input is `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive());
    }

    for fmt in DATE_FORMATS {
        for suffix in TIME_SUFFIXES {
            let pattern = format!("{fmt}{suffix}");
            if let Ok(ts) = NaiveDateTime::parse_from_str(s, &pattern) {
                return Some(ts.date());
            }
        }
    }

    None
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn to_epoch_days(date: NaiveDate) -> i32 {
    // NaiveDate::default() is the Unix epoch
    (date - NaiveDate::default()).num_days() as i32
}

pub fn from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::default().checked_add_signed(chrono::Duration::days(days as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("  2024-01-05 "), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024/01/05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("20240105"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn prefers_day_first_for_ambiguous_slash_dates() {
        assert_eq!(parse_date("03/04/2024"), Some(ymd(2024, 4, 3)));
    }

    #[test]
    fn falls_back_to_month_first() {
        assert_eq!(parse_date("12/31/2024"), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn parses_month_names() {
        assert_eq!(parse_date("5 January 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("Jan 5, 2024"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn drops_time_of_day() {
        assert_eq!(parse_date("2024-01-05 13:45:00"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-05T13:45"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-05T13:45:00+02:00"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn epoch_days_roundtrip_known_values() {
        assert_eq!(to_epoch_days(ymd(1970, 1, 1)), 0);
        assert_eq!(to_epoch_days(ymd(2024, 1, 1)), 19723);
        assert_eq!(from_epoch_days(19723), Some(ymd(2024, 1, 1)));
    }
}

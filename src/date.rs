//! Date parsing and canonical formatting.
//!
//! Every date in the pipeline (entry dates, range bounds) goes through
//! [`parse_timestamp`], so entries and bounds are always compared on the same
//! scale: milliseconds since the Unix epoch, UTC.
//!
//! ## Accepted Forms
//!
//! ```text
//! 2022-04-01                  → UTC midnight
//! 2022-04-01T10:30            → UTC, no offset given
//! 2022-04-01T10:30:15         → UTC, no offset given
//! 2022-04-01 10:30:15         → same, space separator
//! 2022-04-01T10:30:15+02:00   → RFC 3339, offset honoured
//! ```
//!
//! Anything else is unparseable and yields `None`. Callers decide what that
//! means: the range filter drops such entries, the sorter puts them last.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Parse a date or date-time string into milliseconds since the Unix epoch.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Some(date) = parse_date(value) {
        return Some(to_millis(date.midnight().assume_utc()));
    }
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(to_millis(dt));
    }
    let local_forms = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    local_forms
        .iter()
        .find_map(|form| PrimitiveDateTime::parse(value, *form).ok())
        .map(|dt| to_millis(dt.assume_utc()))
}

fn to_millis(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Format a date as `YYYY-MM-DD`, month and day zero-padded.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Current calendar date in UTC, not the local time zone.
///
/// Entry dates without an offset are read as UTC too, so the default window
/// and the entries agree on where a day starts.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn format_pads_month_and_day() {
        assert_eq!(format_date(date!(2022 - 03 - 05)), "2022-03-05");
        assert_eq!(format_date(date!(2023 - 11 - 28)), "2023-11-28");
    }

    #[test]
    fn format_then_parse_is_same_day() {
        let d = date!(2024 - 02 - 29);
        assert_eq!(parse_date(&format_date(d)), Some(d));
    }

    #[test]
    fn plain_date_is_utc_midnight() {
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
    }

    #[test]
    fn date_time_without_offset_is_utc() {
        assert_eq!(parse_timestamp("1970-01-01T00:00:01"), Some(1_000));
        assert_eq!(parse_timestamp("1970-01-01 00:01"), Some(60_000));
    }

    #[test]
    fn rfc3339_offset_is_honoured() {
        assert_eq!(parse_timestamp("1970-01-01T01:00:00+01:00"), Some(0));
        assert_eq!(parse_timestamp("1970-01-01T00:00:00.250Z"), Some(250));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_timestamp(" 1970-01-02 "), Some(86_400_000));
    }

    #[test]
    fn garbage_is_unparseable() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2022-13-01"), None);
        assert_eq!(parse_timestamp("2022-02-30"), None);
    }

    #[test]
    fn today_is_the_utc_date() {
        let before = OffsetDateTime::now_utc().date();
        let day = today();
        let after = OffsetDateTime::now_utc().date();
        assert!(before <= day && day <= after);
    }

    #[test]
    fn later_dates_have_larger_timestamps() {
        let a = parse_timestamp("2022-03-20").unwrap();
        let b = parse_timestamp("2022-04-01").unwrap();
        assert!(a < b);
    }
}

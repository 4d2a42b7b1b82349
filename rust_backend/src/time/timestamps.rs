use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Format used when timestamps are written back out (CSV export, demo rows).
///
/// `%.f` prints nothing for whole seconds, so ordinary timestamps render as
/// `2025-01-01 10:00:00` and sub-second ones keep their precision.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const NAIVE_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

// Slashed dates with a two-digit first field are month first.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date-time string into a naive timestamp.
///
/// Accepted inputs:
/// - RFC 3339 / ISO 8601 with an offset (`2025-01-01T10:00:00+02:00`), converted to UTC
/// - ISO 8601 without an offset, `T` or space separated, with optional
///   seconds and fractional seconds
/// - the same with slashes, year first (`2025/01/15 10:00`) or US-style
///   month first (`01/15/2025 10:00`)
/// - a bare calendar date (`2025-01-01`, `2025/01/01`, `01/01/2025`), read as midnight
///
/// Returns `None` for anything else.
///
/// # Example
/// ```
/// use yt_analytics::time::parse_timestamp;
///
/// let ts = parse_timestamp("2025-01-01T10:00").unwrap();
/// assert_eq!(ts.to_string(), "2025-01-01 10:00:00");
/// assert!(parse_timestamp("not a date").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .map(start_of_day)
}

/// Render a timestamp with [`EXPORT_TIMESTAMP_FORMAT`].
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(EXPORT_TIMESTAMP_FORMAT).to_string()
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Midnight at the start of the day after `date`.
///
/// Used as an exclusive upper bound so that every time on `date` is covered.
/// Returns `None` for the last representable date, meaning "unbounded".
pub fn end_of_day_exclusive(date: NaiveDate) -> Option<NaiveDateTime> {
    date.succ_opt().map(start_of_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_variants() {
        let expected = date(2025, 1, 1).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-01-01T10:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-01T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-01 10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("  2025-01-01 10:00  "), Some(expected));
    }

    #[test]
    fn test_parse_slash_variants() {
        let expected = date(2025, 1, 15).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025/01/15 10:00"), Some(expected));
        assert_eq!(parse_timestamp("2025/01/15 10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("01/15/2025 10:00"), Some(expected));
        assert_eq!(parse_timestamp("01/15/2025 10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025/01/15"), Some(start_of_day(date(2025, 1, 15))));
        assert_eq!(parse_timestamp("01/15/2025"), Some(start_of_day(date(2025, 1, 15))));
        assert_eq!(parse_timestamp("15/01/2025"), None);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let ts = parse_timestamp("2025-01-01 10:00:00.250").unwrap();
        assert_eq!(ts.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_offset_is_normalised_to_utc() {
        let ts = parse_timestamp("2025-01-01T10:00:00+02:00").unwrap();
        assert_eq!(ts, date(2025, 1, 1).and_hms_opt(8, 0, 0).unwrap());

        let ts = parse_timestamp("2025-01-01T10:00:00Z").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        assert_eq!(
            parse_timestamp("2025-02-03"),
            Some(date(2025, 2, 3).and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2025-13-01"), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
    }

    #[test]
    fn test_format_roundtrip() {
        let ts = date(2025, 6, 30).and_hms_milli_opt(23, 59, 1, 500).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-06-30 23:59:01.500");
        assert_eq!(parse_timestamp(&format_timestamp(&ts)), Some(ts));

        let whole = date(2025, 6, 30).and_hms_opt(8, 0, 0).unwrap();
        assert_eq!(format_timestamp(&whole), "2025-06-30 08:00:00");
    }

    #[test]
    fn test_end_of_day_exclusive() {
        assert_eq!(
            end_of_day_exclusive(date(2025, 1, 31)),
            Some(start_of_day(date(2025, 2, 1)))
        );
        assert_eq!(end_of_day_exclusive(NaiveDate::MAX), None);
    }
}

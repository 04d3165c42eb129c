//! Cell text parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts accepted in the date column, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-time layouts accepted in the date column; the time is discarded.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a date cell into a calendar date.
///
/// Accepts ISO dates, slash-separated dates, and date-times (plain or RFC 3339),
/// which are truncated to their date. Surrounding whitespace is ignored.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse an amount cell into a finite number.
///
/// Empty cells, non-numeric text and non-finite values (`nan`, `inf`) yield `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2024-01-03"), Some(date(2024, 1, 3)));
        assert_eq!(parse_date("  2024-01-03 "), Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_parse_other_layouts() {
        assert_eq!(parse_date("2024/02/29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("03/15/2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("2024-03-15 16:30:00"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("2024-03-15T16:30:00"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("2024-03-15T23:30:00+02:00"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_parse_bad_date() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount("-50"), Some(-50.0));
        assert_eq!(parse_amount(" 25.75 "), Some(25.75));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
    }

    #[test]
    fn test_parse_bad_amount() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("nan"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("1,000"), None);
    }
}

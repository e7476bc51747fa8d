//! HTTP date formatting
//!
//! `Last-Modified` uses the IMF-fixdate form from RFC 7231, always in GMT:
//! `Sun, 06 Nov 1994 08:49:37 GMT`.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a filesystem timestamp as an HTTP date
pub fn format_http_date(time: SystemTime) -> String {
    let utc: DateTime<Utc> = time.into();
    utc.format(IMF_FIXDATE).to_string()
}

/// Parse an IMF-fixdate header value back into a UTC timestamp
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim().strip_suffix("GMT")?;
    chrono::NaiveDateTime::parse_from_str(trimmed.trim_end(), "%a, %d %b %Y %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_rfc_example() {
        let time = UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(format_http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_single_digit_day_is_padded() {
        // 2024-03-05T07:08:09Z
        let time = UNIX_EPOCH + Duration::from_secs(1_709_622_489);
        assert_eq!(format_http_date(time), "Tue, 05 Mar 2024 07:08:09 GMT");
    }

    #[test]
    fn test_subsecond_precision_is_dropped() {
        let time = UNIX_EPOCH + Duration::from_millis(784_111_777_999);
        assert_eq!(format_http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 784_111_777);
        assert!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT").is_none());
        assert!(parse_http_date("not a date").is_none());
    }
}

//! Timestamp formatting for API responses.

use chrono::{DateTime, Utc};

/// Record timestamp format: `"2024-07-01 16:20:05 PM"`.
///
/// 24-hour clock with a trailing AM/PM marker, byte-compatible with the
/// service's historical responses.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %p";

/// Formats a timestamp the way link records are rendered in responses.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_afternoon() {
        let ts = Utc.with_ymd_and_hms(2024, 7, 1, 16, 20, 5).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-07-01 16:20:05 PM");
    }

    #[test]
    fn test_format_morning() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 31, 9, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-12-31 09:00:00 AM");
    }
}

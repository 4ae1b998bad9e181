//! Epoch-second helpers.
//!
//! The API represents every timestamp as integer seconds since the Unix
//! epoch, both in entity bodies and in filter values.

use chrono::{DateTime, TimeZone, Utc};

/// Convert a datetime to the integer epoch seconds the API expects.
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
    dt.timestamp()
}

/// Convert an API timestamp back to a datetime.
///
/// Returns None for values outside the representable range.
pub fn timestamp_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp, 0).single()
}

/// Current time as an API timestamp.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0).unwrap();
        let ts = datetime_to_timestamp(dt);
        assert_eq!(timestamp_to_datetime(ts), Some(dt));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert!(timestamp_to_datetime(i64::MAX).is_none());
    }
}

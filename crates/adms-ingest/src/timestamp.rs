//! Permissive timestamp interpretation.
//!
//! Devices render punch times in a handful of layouts and a few push raw
//! epoch seconds. The layout list is a closed policy
//! ([`TIMESTAMP_LAYOUTS`]): attempts run in fixed order because the
//! minute-precision layouts are prefixes of the second-precision ones, and
//! the first full match wins.

use adms_core::constants::{MAX_EPOCH_SECONDS, MIN_EPOCH_SECONDS, TIMESTAMP_LAYOUTS};
use chrono::{DateTime, NaiveDateTime};

/// Parse a free-form device timestamp into a wall-clock instant.
///
/// Tries each supported layout in order, then falls back to epoch-seconds
/// interpretation. Epoch values are accepted only strictly between
/// [`MIN_EPOCH_SECONDS`] and [`MAX_EPOCH_SECONDS`], which rejects small
/// integers (user IDs, codes) and millisecond timestamps alike.
///
/// Returns `None` when nothing matches; the caller drops the record.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for layout in TIMESTAMP_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(parsed);
        }
    }

    if let Ok(seconds) = raw.parse::<i64>() {
        if seconds > MIN_EPOCH_SECONDS && seconds < MAX_EPOCH_SECONDS {
            return DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use adms_core::constants::TIMESTAMP_DISPLAY_LAYOUT;
    use rstest::rstest;

    #[rstest]
    #[case("2025-12-12 09:00:00")]
    #[case("2025-12-12T09:00:00")]
    #[case("2025/12/12 09:00:00")]
    #[case("12/12/2025 09:00:00")]
    #[case("2025-12-12 09:00")]
    #[case("2025-12-12T09:00")]
    fn test_supported_layouts(#[case] input: &str) {
        let parsed = parse_timestamp(input).unwrap();
        assert_eq!(
            parsed.format(TIMESTAMP_DISPLAY_LAYOUT).to_string(),
            "2025-12-12 09:00:00"
        );
    }

    /// Each layout round-trips to second precision.
    #[rstest]
    #[case("%Y-%m-%d %H:%M:%S")]
    #[case("%Y-%m-%dT%H:%M:%S")]
    #[case("%Y/%m/%d %H:%M:%S")]
    #[case("%d/%m/%Y %H:%M:%S")]
    #[case("%Y-%m-%d %H:%M")]
    #[case("%Y-%m-%dT%H:%M")]
    fn test_layout_round_trip(#[case] layout: &str) {
        let instant = NaiveDateTime::parse_from_str("2025-03-07 14:25:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let rendered = instant.format(layout).to_string();
        assert_eq!(parse_timestamp(&rendered), Some(instant));
    }

    #[test]
    fn test_day_first_layout_not_confused_with_year_first() {
        // 07/03/2025 must read as 7 March, not an invalid year-first date
        let parsed = parse_timestamp("07/03/2025 08:30:00").unwrap();
        assert_eq!(
            parsed.format(TIMESTAMP_DISPLAY_LAYOUT).to_string(),
            "2025-03-07 08:30:00"
        );
    }

    #[test]
    fn test_epoch_seconds_in_range() {
        let parsed = parse_timestamp("1734000000").unwrap();
        assert_eq!(
            parsed,
            DateTime::from_timestamp(1_734_000_000, 0).unwrap().naive_utc()
        );
    }

    #[rstest]
    #[case("101")] // small integer: a user ID, not a time
    #[case("1000000000")] // lower bound is exclusive
    #[case("9999999999")] // upper bound is exclusive
    #[case("1734000000000")] // milliseconds
    #[case("-1734000000")]
    fn test_epoch_seconds_out_of_range(#[case] input: &str) {
        assert_eq!(parse_timestamp(input), None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not a date")]
    #[case("2025-12-12")] // date without time is not a punch instant
    #[case("2025-13-40 09:00:00")] // invalid calendar date
    fn test_unparseable(#[case] input: &str) {
        assert_eq!(parse_timestamp(input), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert!(parse_timestamp("  2025-12-12 09:00:00\n").is_some());
    }
}

//! Growing-days parsing property-based and unit tests
//!
//! Covers the lenient grammar: digits and dashes survive, everything else is
//! noise, and the first and last numeric segments become the range.

use proptest::prelude::*;
use shared::{parse_growing_days, GrowingDaysRange};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Day counts as they appear in seed catalogs
fn day_count_strategy() -> impl Strategy<Value = u32> {
    1..=400u32
}

/// Decoration that contains no digits or dashes
fn noise_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z ~.,()]{0,8}"
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_missing_and_empty_are_zero() {
    assert_eq!(parse_growing_days(None), GrowingDaysRange::new(0, 0));
    assert_eq!(parse_growing_days(Some("")), GrowingDaysRange::new(0, 0));
    assert_eq!(parse_growing_days(Some("days")), GrowingDaysRange::new(0, 0));
}

#[test]
fn test_catalog_formats() {
    assert_eq!(parse_growing_days(Some("75")), GrowingDaysRange::new(75, 75));
    assert_eq!(parse_growing_days(Some("75-85")), GrowingDaysRange::new(75, 85));
    assert_eq!(parse_growing_days(Some("70-80-90")), GrowingDaysRange::new(70, 90));
    assert_eq!(parse_growing_days(Some("~75 days")), GrowingDaysRange::new(75, 75));
    assert_eq!(parse_growing_days(Some("55 - 60 days")), GrowingDaysRange::new(55, 60));
}

#[test]
fn test_inverted_range_kept_as_written() {
    let range = parse_growing_days(Some("90-70"));
    assert_eq!(range, GrowingDaysRange::new(90, 70));
    assert_eq!(range.span_days(), 0);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Parsing is total: any input yields a range
    #[test]
    fn prop_parse_never_panics(raw in ".{0,40}") {
        let _ = parse_growing_days(Some(&raw));
    }

    /// A single number surrounded by noise parses to itself on both ends
    #[test]
    fn prop_single_number_with_noise(
        days in day_count_strategy(),
        prefix in noise_strategy(),
        suffix in noise_strategy(),
    ) {
        let raw = format!("{}{}{}", prefix, days, suffix);
        prop_assert_eq!(parse_growing_days(Some(&raw)), GrowingDaysRange::single(days));
    }

    /// "a-b" parses to {a, b} regardless of order
    #[test]
    fn prop_dash_pair(early in day_count_strategy(), late in day_count_strategy()) {
        let raw = format!("{}-{} days", early, late);
        prop_assert_eq!(parse_growing_days(Some(&raw)), GrowingDaysRange::new(early, late));
    }

    /// Middle segments are ignored
    #[test]
    fn prop_first_and_last_segments_win(
        segments in prop::collection::vec(day_count_strategy(), 3..6),
    ) {
        let raw = segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("-");
        let expected = GrowingDaysRange::new(segments[0], segments[segments.len() - 1]);
        prop_assert_eq!(parse_growing_days(Some(&raw)), expected);
    }

    /// Stray dashes never produce extra segments
    #[test]
    fn prop_stray_dashes_ignored(days in day_count_strategy(), dashes in 1..4usize) {
        let pad = "-".repeat(dashes);
        let raw = format!("{}{}{}", pad, days, pad);
        prop_assert_eq!(parse_growing_days(Some(&raw)), GrowingDaysRange::single(days));
    }
}

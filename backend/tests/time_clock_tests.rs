//! Time clock property-based and unit tests
//!
//! Comprehensive tests for:
//! - Hours band classification thresholds
//! - Multi-block daily totals
//! - Clock-in/clock-out preconditions and block numbering

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use shared::{format_hours, ClockError, HoursBand, WorkerDay};
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, hour, minute, 0).unwrap()
}

fn empty_day() -> WorkerDay {
    WorkerDay::new(
        Uuid::new_v4(),
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        Vec::new(),
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_split_shift_totals_regular() {
    let mut day = empty_day();
    day.clock_in(at(6, 0)).unwrap();
    day.clock_out(at(10, 0)).unwrap();
    day.clock_in(at(13, 0)).unwrap();
    day.clock_out(at(16, 30)).unwrap();

    let summary = day.summary(at(18, 0));
    assert!((summary.total_hours - 7.5).abs() < 1e-9);
    assert_eq!(summary.band, HoursBand::Regular);
    assert_eq!(summary.block_count, 2);
    assert!(!summary.is_clocked_in);
    assert!((summary.remaining_regular_hours - 0.5).abs() < 1e-9);
}

#[test]
fn test_eight_and_a_half_hours_is_warning() {
    let mut day = empty_day();
    day.clock_in(at(7, 0)).unwrap();
    day.clock_out(at(15, 30)).unwrap();

    let summary = day.summary(at(16, 0));
    assert_eq!(summary.band, HoursBand::Warning);
    assert_eq!(format_hours(summary.total_hours), "8h 30m");
}

#[test]
fn test_double_clock_in_keeps_first_block() {
    let mut day = empty_day();
    let first = day.clock_in(at(8, 0)).unwrap().clone();

    let err = day.clock_in(at(9, 0)).unwrap_err();
    assert_eq!(
        err,
        ClockError::AlreadyClockedIn {
            worker_id: day.worker_id,
            block_number: 1,
        }
    );
    assert_eq!(day.blocks(), &[first]);
}

#[test]
fn test_clock_out_without_active_block() {
    let mut day = empty_day();
    assert!(matches!(
        day.clock_out(at(17, 0)),
        Err(ClockError::NotClockedIn { .. })
    ));
}

#[test]
fn test_active_block_counts_live_hours() {
    let mut day = empty_day();
    day.clock_in(at(6, 0)).unwrap();
    day.clock_out(at(10, 0)).unwrap();
    day.clock_in(at(11, 0)).unwrap();

    let summary = day.summary(at(17, 0));
    assert!((summary.total_hours - 10.0).abs() < 1e-9);
    assert_eq!(summary.band, HoursBand::Excessive);
    assert!(summary.is_clocked_in);
    assert_eq!(summary.remaining_regular_hours, 0.0);
}

#[test]
fn test_deleting_last_block_keeps_number_retired() {
    let mut day = empty_day();
    day.clock_in(at(8, 0)).unwrap();
    day.clock_out(at(10, 0)).unwrap();
    let second = day.clock_in(at(11, 0)).unwrap().id;
    day.clock_out(at(12, 0)).unwrap();

    day.remove_block(second).unwrap();
    assert_eq!(day.clock_in(at(13, 0)).unwrap().block_number, 3);
}

#[test]
fn test_shift_across_midnight() {
    let worker_id = Uuid::new_v4();
    let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
    let next_morning = Utc.with_ymd_and_hms(2024, 6, 4, 6, 0, 0).unwrap();

    let mut evening = WorkerDay::new(worker_id, monday, Vec::new());
    let open = evening.clock_in(at(22, 0)).unwrap().clone();

    // Tuesday is loaded with Monday's open block attached
    let mut morning =
        WorkerDay::new(worker_id, tuesday, Vec::new()).with_open_block(open.clone());
    assert!(matches!(
        morning.clone().clock_in(next_morning),
        Err(ClockError::AlreadyClockedIn { block_number: 1, .. })
    ));

    let closed = morning.clock_out(next_morning).unwrap().clone();
    assert_eq!(closed.id, open.id);
    assert_eq!(closed.work_date, monday);
    assert!((closed.hours_worked - 8.0).abs() < 1e-9);

    let monday_day = WorkerDay::new(worker_id, monday, vec![closed]);
    assert_eq!(monday_day.summary(next_morning).band, HoursBand::Warning);
    assert!(morning.open_block().is_none());
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Bands partition the non-negative hours at 8, 9 and 10
    #[test]
    fn prop_band_thresholds(hours in 0.0..24.0f64) {
        let expected = if hours >= 10.0 {
            HoursBand::Excessive
        } else if hours >= 9.0 {
            HoursBand::Overtime
        } else if hours >= 8.0 {
            HoursBand::Warning
        } else {
            HoursBand::Regular
        };
        prop_assert_eq!(HoursBand::classify(hours), expected);
    }

    /// The daily total is the sum of each block's minutes
    #[test]
    fn prop_total_is_sum_of_blocks(shifts in prop::collection::vec((0..60i64, 1..180i64), 1..6)) {
        let mut day = empty_day();
        let mut cursor = at(0, 0);
        let mut expected_minutes = 0;

        for (gap, length) in &shifts {
            cursor += Duration::minutes(*gap);
            day.clock_in(cursor).unwrap();
            cursor += Duration::minutes(*length);
            day.clock_out(cursor).unwrap();
            expected_minutes += length;
        }

        let total = day.total_hours(cursor);
        prop_assert!((total - expected_minutes as f64 / 60.0).abs() < 1e-6);
    }

    /// Blocks are numbered 1..n in clock-in order
    #[test]
    fn prop_blocks_numbered_sequentially(count in 1..8usize) {
        let mut day = empty_day();
        for i in 0..count {
            let start = at(0, 0) + Duration::minutes(i as i64 * 60);
            day.clock_in(start).unwrap();
            day.clock_out(start + Duration::minutes(30)).unwrap();
        }

        let numbers: Vec<i32> = day.blocks().iter().map(|b| b.block_number).collect();
        let expected: Vec<i32> = (1..=count as i32).collect();
        prop_assert_eq!(numbers, expected);
    }

    /// Removing any block, the highest included, never renumbers the
    /// others or frees its number
    #[test]
    fn prop_remove_keeps_numbers(
        (count, victim) in (2..6usize).prop_flat_map(|count| (Just(count), 0..count)),
    ) {
        let mut day = empty_day();
        for i in 0..count {
            let start = at(0, 0) + Duration::minutes(i as i64 * 60);
            day.clock_in(start).unwrap();
            day.clock_out(start + Duration::minutes(30)).unwrap();
        }

        let victim_id = day.blocks()[victim].id;
        day.remove_block(victim_id).unwrap();

        let survivors: Vec<i32> = day.blocks().iter().map(|b| b.block_number).collect();
        let expected: Vec<i32> = (1..=count as i32).filter(|n| *n != victim as i32 + 1).collect();
        prop_assert_eq!(survivors, expected);

        let next = day.clock_in(at(20, 0)).unwrap().block_number;
        prop_assert_eq!(next, count as i32 + 1);
    }
}

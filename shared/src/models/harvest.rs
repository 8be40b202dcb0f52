//! Harvest timing models
//!
//! Projects harvest dates from a planting date and a growing-days range,
//! labels them with coarse season periods, and buckets the weeks of the
//! year for the harvest calendar heat map. No weather or zone data is
//! consulted; these are display heuristics.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Datelike, Days, Month, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

use super::GrowingDaysRange;

/// Weeks shown on the harvest calendar
pub const CALENDAR_WEEKS: u32 = 52;

/// Weeks treated as the generic growing season
pub const GROWING_SEASON_WEEKS: RangeInclusive<u32> = 10..=40;

/// The best-harvest window never spans more than this many weeks
pub const BEST_WINDOW_WEEKS: u32 = 3;

/// Third of a month a date falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonPart {
    /// Days 1-10
    Early,
    /// Days 11-20
    Mid,
    /// Day 21 onwards
    Late,
}

impl SeasonPart {
    pub fn from_day(day: u32) -> Self {
        match day {
            0..=10 => SeasonPart::Early,
            11..=20 => SeasonPart::Mid,
            _ => SeasonPart::Late,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonPart::Early => "early",
            SeasonPart::Mid => "mid",
            SeasonPart::Late => "late",
        }
    }
}

/// Coarse harvest period such as "mid March"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonLabel {
    Period { part: SeasonPart, month: Month },
    Unknown,
}

impl SeasonLabel {
    /// Build a label from a day-of-month and a 1-based month number
    pub fn from_day_and_month(day: u32, month: u32) -> Self {
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok());

        match month {
            Some(month) => SeasonLabel::Period {
                part: SeasonPart::from_day(day),
                month,
            },
            None => SeasonLabel::Unknown,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_day_and_month(date.day(), date.month())
    }
}

impl std::fmt::Display for SeasonLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonLabel::Period { part, month } => write!(f, "{} {}", part.as_str(), month.name()),
            SeasonLabel::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Serialize for SeasonLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Projected harvest window for a planting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarvestEstimate {
    pub early_date: NaiveDate,
    pub late_date: NaiveDate,
    pub early_label: SeasonLabel,
    pub late_label: SeasonLabel,
    /// "mid March to late March", or a single label when both ends agree
    pub range_text: String,
}

/// Add calendar days, saturating at the last representable date
fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Project early and late harvest dates from a planting date
pub fn estimate_harvest(range: GrowingDaysRange, planted_date: NaiveDate) -> HarvestEstimate {
    let early_date = add_days(planted_date, range.early);
    let late_date = add_days(planted_date, range.late);
    let early_label = SeasonLabel::for_date(early_date);
    let late_label = SeasonLabel::for_date(late_date);

    let range_text = if early_label == late_label {
        early_label.to_string()
    } else {
        format!("{} to {}", early_label, late_label)
    };

    HarvestEstimate {
        early_date,
        late_date,
        early_label,
        late_label,
        range_text,
    }
}

/// Whole days until the early harvest date, never negative
pub fn days_until_harvest(range: GrowingDaysRange, planted_date: NaiveDate, today: NaiveDate) -> i64 {
    add_days(planted_date, range.early)
        .signed_duration_since(today)
        .num_days()
        .max(0)
}

/// Percent of the way from planting to the early harvest date (0-100)
pub fn growth_progress(range: GrowingDaysRange, planted_date: NaiveDate, today: NaiveDate) -> f64 {
    if today < planted_date {
        return 0.0;
    }
    if range.early == 0 {
        return 100.0;
    }
    let elapsed = today.signed_duration_since(planted_date).num_days() as f64;
    (elapsed * 100.0 / f64::from(range.early)).min(100.0)
}

/// Heat-map classification of a calendar week
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HarvestBucket {
    Best,
    Good,
    Fair,
    OffSeason,
}

impl HarvestBucket {
    pub fn label(&self) -> &'static str {
        match self {
            HarvestBucket::Best => "Best",
            HarvestBucket::Good => "Good",
            HarvestBucket::Fair => "Fair",
            HarvestBucket::OffSeason => "Off Season",
        }
    }
}

impl std::fmt::Display for HarvestBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify every week 1..=52 for the harvest calendar
///
/// The best window starts at the ISO week of the early date and runs at most
/// three weeks, stopping at the late week. Good weeks pad the early-late span
/// by one week on each side. `_usda_zone` is reserved for zone adjustment and
/// currently has no effect.
pub fn calendar_buckets(
    range: GrowingDaysRange,
    planted_date: NaiveDate,
    _usda_zone: Option<&str>,
) -> BTreeMap<u32, HarvestBucket> {
    let estimate = estimate_harvest(range, planted_date);
    let early_week = estimate.early_date.iso_week().week();
    let late_week = estimate.late_date.iso_week().week();

    let best_weeks = early_week..=late_week.min(early_week + BEST_WINDOW_WEEKS - 1);
    let good_weeks = early_week.saturating_sub(1).max(1)..=(late_week + 1).min(CALENDAR_WEEKS);

    (1..=CALENDAR_WEEKS)
        .map(|week| {
            let bucket = if best_weeks.contains(&week) {
                HarvestBucket::Best
            } else if good_weeks.contains(&week) {
                HarvestBucket::Good
            } else if GROWING_SEASON_WEEKS.contains(&week) {
                HarvestBucket::Fair
            } else {
                HarvestBucket::OffSeason
            };
            (week, bucket)
        })
        .collect()
}

/// Harvest picture for a single grow as of a given day
#[derive(Debug, Clone, Serialize)]
pub struct HarvestOutlook {
    pub growing_days: GrowingDaysRange,
    pub estimate: HarvestEstimate,
    pub days_until_harvest: i64,
    pub progress_percent: f64,
}

impl HarvestOutlook {
    pub fn new(range: GrowingDaysRange, planted_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            growing_days: range,
            estimate: estimate_harvest(range, planted_date),
            days_until_harvest: days_until_harvest(range, planted_date, today),
            progress_percent: growth_progress(range, planted_date, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weeks_in(buckets: &BTreeMap<u32, HarvestBucket>, bucket: HarvestBucket) -> Vec<u32> {
        buckets
            .iter()
            .filter(|(_, b)| **b == bucket)
            .map(|(w, _)| *w)
            .collect()
    }

    #[test]
    fn test_tomato_scenario() {
        let range = GrowingDaysRange::parse(Some("75-85"));
        let estimate = estimate_harvest(range, date(2024, 1, 1));

        assert_eq!(estimate.early_date, date(2024, 3, 16));
        assert_eq!(estimate.late_date, date(2024, 3, 26));
        assert_eq!(estimate.early_label.to_string(), "mid March");
        assert_eq!(estimate.late_label.to_string(), "late March");
        assert_eq!(estimate.range_text, "mid March to late March");
    }

    #[test]
    fn test_range_text_collapses_equal_labels() {
        let estimate = estimate_harvest(GrowingDaysRange::new(2, 5), date(2024, 6, 1));
        assert_eq!(estimate.range_text, "early June");
    }

    #[test]
    fn test_season_part_boundaries() {
        assert_eq!(SeasonPart::from_day(1), SeasonPart::Early);
        assert_eq!(SeasonPart::from_day(10), SeasonPart::Early);
        assert_eq!(SeasonPart::from_day(11), SeasonPart::Mid);
        assert_eq!(SeasonPart::from_day(20), SeasonPart::Mid);
        assert_eq!(SeasonPart::from_day(21), SeasonPart::Late);
        assert_eq!(SeasonPart::from_day(31), SeasonPart::Late);
    }

    #[test]
    fn test_out_of_range_month_is_unknown() {
        assert_eq!(SeasonLabel::from_day_and_month(5, 0), SeasonLabel::Unknown);
        assert_eq!(SeasonLabel::from_day_and_month(5, 13), SeasonLabel::Unknown);
        assert_eq!(SeasonLabel::from_day_and_month(5, 300), SeasonLabel::Unknown);
        assert_eq!(SeasonLabel::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_label_serializes_as_text() {
        let label = SeasonLabel::from_day_and_month(25, 12);
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"late December\"");
    }

    #[test]
    fn test_dates_cross_leap_day() {
        let estimate = estimate_harvest(GrowingDaysRange::single(1), date(2024, 2, 28));
        assert_eq!(estimate.early_date, date(2024, 2, 29));
    }

    #[test]
    fn test_huge_range_saturates() {
        let estimate = estimate_harvest(GrowingDaysRange::single(u32::MAX), date(2024, 1, 1));
        assert_eq!(estimate.early_date, NaiveDate::MAX);
    }

    #[test]
    fn test_days_until_harvest_counts_down() {
        let range = GrowingDaysRange::new(75, 85);
        let planted = date(2024, 1, 1);
        assert_eq!(days_until_harvest(range, planted, date(2024, 3, 6)), 10);
        assert_eq!(days_until_harvest(range, planted, date(2024, 3, 16)), 0);
    }

    #[test]
    fn test_days_until_harvest_clamped_after_harvest() {
        let range = GrowingDaysRange::new(75, 85);
        assert_eq!(days_until_harvest(range, date(2024, 1, 1), date(2024, 5, 1)), 0);
    }

    #[test]
    fn test_growth_progress() {
        let range = GrowingDaysRange::new(100, 110);
        let planted = date(2024, 1, 1);
        assert_eq!(growth_progress(range, planted, date(2023, 12, 1)), 0.0);
        assert!((growth_progress(range, planted, date(2024, 1, 26)) - 25.0).abs() < 1e-9);
        assert_eq!(growth_progress(range, planted, date(2024, 12, 1)), 100.0);
        assert_eq!(growth_progress(GrowingDaysRange::default(), planted, planted), 100.0);
    }

    #[test]
    fn test_best_window_capped_at_three_weeks() {
        // 2024-03-05 + 75 days = 2024-05-19 (ISO week 20), + 85 = 2024-05-29 (week 22)
        let buckets = calendar_buckets(GrowingDaysRange::new(75, 85), date(2024, 3, 5), None);
        assert_eq!(weeks_in(&buckets, HarvestBucket::Best), vec![20, 21, 22]);
        assert_eq!(weeks_in(&buckets, HarvestBucket::Good), vec![19, 23]);
    }

    #[test]
    fn test_long_span_keeps_good_weeks_after_best() {
        // 2024-03-05 + 75 = week 20, + 110 = 2024-06-23 (week 25)
        let buckets = calendar_buckets(GrowingDaysRange::new(75, 110), date(2024, 3, 5), None);
        assert_eq!(weeks_in(&buckets, HarvestBucket::Best), vec![20, 21, 22]);
        assert_eq!(weeks_in(&buckets, HarvestBucket::Good), vec![19, 23, 24, 25, 26]);
    }

    #[test]
    fn test_fair_and_off_season_outside_window() {
        let buckets = calendar_buckets(GrowingDaysRange::new(75, 85), date(2024, 3, 5), Some("7a"));
        assert_eq!(buckets.len(), 52);
        assert_eq!(buckets[&10], HarvestBucket::Fair);
        assert_eq!(buckets[&40], HarvestBucket::Fair);
        assert_eq!(buckets[&9], HarvestBucket::OffSeason);
        assert_eq!(buckets[&41], HarvestBucket::OffSeason);
    }

    #[test]
    fn test_good_weeks_clamped_at_year_start() {
        // 2024-01-01 + 0 days is ISO week 1
        let buckets = calendar_buckets(GrowingDaysRange::new(0, 0), date(2024, 1, 1), None);
        assert_eq!(weeks_in(&buckets, HarvestBucket::Best), vec![1]);
        assert_eq!(weeks_in(&buckets, HarvestBucket::Good), vec![2]);
    }

    #[test]
    fn test_zone_does_not_change_buckets() {
        let range = GrowingDaysRange::new(60, 70);
        let planted = date(2024, 4, 1);
        assert_eq!(
            calendar_buckets(range, planted, None),
            calendar_buckets(range, planted, Some("5b"))
        );
    }

    #[test]
    fn test_bucket_serialization() {
        assert_eq!(
            serde_json::to_string(&HarvestBucket::OffSeason).unwrap(),
            "\"off_season\""
        );
        assert_eq!(HarvestBucket::OffSeason.to_string(), "Off Season");
    }
}

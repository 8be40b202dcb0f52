//! Common types used across the platform

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Maximum number of days a single range query may span
    pub const MAX_DAYS: i64 = 366;

    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered, 0 when `end` precedes `start`
    pub fn len_days(&self) -> i64 {
        (self.end.signed_duration_since(self.start).num_days() + 1).max(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut next = Some(self.start);
        std::iter::from_fn(move || {
            let current = next.filter(|date| *date <= self.end)?;
            next = current.checked_add_days(Days::new(1));
            Some(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_crosses_month_boundary() {
        let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1));
        let days: Vec<_> = range.days().collect();
        assert_eq!(days, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
        assert_eq!(range.len_days(), 3);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::new(date(2024, 3, 2), date(2024, 3, 1));
        assert_eq!(range.days().count(), 0);
        assert_eq!(range.len_days(), 0);
        assert!(!range.contains(date(2024, 3, 1)));
    }
}

//! Growing-days ranges parsed from free-form cultivar reference data

use serde::{Deserialize, Serialize};

/// Estimated span from planting to harvest readiness, in days
///
/// `early <= late` is not guaranteed: a malformed source string such as
/// "90-70" comes through as written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrowingDaysRange {
    pub early: u32,
    pub late: u32,
}

impl GrowingDaysRange {
    pub fn new(early: u32, late: u32) -> Self {
        Self { early, late }
    }

    /// Range where the early and late estimates coincide
    pub fn single(days: u32) -> Self {
        Self::new(days, days)
    }

    pub fn parse(raw: Option<&str>) -> Self {
        parse_growing_days(raw)
    }

    /// True when the source string yielded any usable number
    pub fn is_known(&self) -> bool {
        self.early > 0 || self.late > 0
    }

    pub fn span_days(&self) -> u32 {
        self.late.saturating_sub(self.early)
    }

    /// Human-readable form, e.g. "75-85 days" or "90 days"
    pub fn display_text(&self) -> String {
        if !self.is_known() {
            "Unknown".to_string()
        } else if self.early == self.late {
            format!("{} days", self.early)
        } else {
            format!("{}-{} days", self.early, self.late)
        }
    }
}

impl std::fmt::Display for GrowingDaysRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Parse a growing-days string such as "75-85", "90" or "~75 days"
///
/// Everything except ASCII digits and `-` is discarded, the remainder is
/// split on `-` and empty segments are dropped. With three or more
/// segments the first and last are used. A segment that does not parse
/// (including overflow) counts as 0; this never fails.
pub fn parse_growing_days(raw: Option<&str>) -> GrowingDaysRange {
    let Some(raw) = raw else {
        return GrowingDaysRange::default();
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    let segments: Vec<&str> = cleaned.split('-').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => GrowingDaysRange::default(),
        [only] => GrowingDaysRange::single(parse_days(only)),
        [first, .., last] => GrowingDaysRange::new(parse_days(first), parse_days(last)),
    }
}

fn parse_days(segment: &str) -> u32 {
    segment.parse().unwrap_or(0)
}

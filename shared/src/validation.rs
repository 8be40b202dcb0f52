//! Validation utilities for the Farm Operations Platform
//!
//! Growing-days text is deliberately not validated here: the parser accepts
//! anything and degrades to zero, and existing reference data relies on that.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::DateRange;

// ============================================================================
// Crop Validations
// ============================================================================

/// Validate a USDA hardiness zone such as "7", "7a" or "10b"
pub fn validate_usda_zone(zone: &str) -> Result<(), &'static str> {
    let zone = zone.trim();
    let digits_end = zone
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(zone.len());
    let (number, suffix) = zone.split_at(digits_end);

    let number: u32 = number.parse().map_err(|_| "USDA zone must start with a number")?;
    if !(1..=13).contains(&number) {
        return Err("USDA zone must be between 1 and 13");
    }
    if !matches!(suffix, "" | "a" | "b" | "A" | "B") {
        return Err("USDA zone suffix must be 'a' or 'b'");
    }
    Ok(())
}

/// Validate a planting date is not unreasonably far in the future
pub fn validate_planted_date(planted: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if planted.signed_duration_since(today).num_days() > 366 {
        return Err("Planting date cannot be more than a year ahead");
    }
    Ok(())
}

// ============================================================================
// Time Clock Validations
// ============================================================================

/// Validate a clock-out does not precede its clock-in
pub fn validate_clock_sequence(
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
) -> Result<(), &'static str> {
    if clock_out < clock_in {
        return Err("Clock-out cannot be earlier than clock-in");
    }
    Ok(())
}

/// Validate a reporting date range
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if range.end < range.start {
        return Err("End date must not be before start date");
    }
    if range.len_days() > DateRange::MAX_DAYS {
        return Err("Date range cannot exceed 366 days");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a display name (1-100 characters after trimming)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty");
    }
    if trimmed.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

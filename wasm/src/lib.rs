//! WebAssembly module for the Farm Operations Platform
//!
//! Provides client-side computation for:
//! - Growing-days parsing
//! - Harvest estimates and calendar heat maps
//! - Time clock hour calculations
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings, instants as RFC 3339
//! strings, and structured results as JSON text.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("farm-ops-wasm loaded"));
}

fn parse_date(value: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", value, e)))
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JsValue::from_str(&format!("Invalid timestamp '{}': {}", value, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Browser-local calendar date
fn local_today() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .ok_or_else(|| JsValue::from_str("Browser clock returned an invalid date"))
}

/// Parse a growing-days string into `{"early": n, "late": n}`
#[wasm_bindgen]
pub fn parse_growing_days(raw: Option<String>) -> Result<String, JsValue> {
    to_json(&GrowingDaysRange::parse(raw.as_deref()))
}

/// Harvest estimate for a planting as JSON
#[wasm_bindgen]
pub fn estimate_harvest(growing_days: Option<String>, planted_date: &str) -> Result<String, JsValue> {
    let range = GrowingDaysRange::parse(growing_days.as_deref());
    let estimate = shared::estimate_harvest(range, parse_date(planted_date)?);
    to_json(&estimate)
}

/// Week number to bucket map as JSON, e.g. `{"20": "best", ...}`
#[wasm_bindgen]
pub fn harvest_calendar(
    growing_days: Option<String>,
    planted_date: &str,
    usda_zone: Option<String>,
) -> Result<String, JsValue> {
    if let Some(zone) = usda_zone.as_deref() {
        validate_usda_zone(zone).map_err(JsValue::from_str)?;
    }
    let range = GrowingDaysRange::parse(growing_days.as_deref());
    let weeks = calendar_buckets(range, parse_date(planted_date)?, usda_zone.as_deref());
    to_json(&weeks)
}

/// Days until the early harvest date, counted from the browser's date
#[wasm_bindgen]
pub fn days_until_harvest(growing_days: Option<String>, planted_date: &str) -> Result<i64, JsValue> {
    days_until_harvest_on(growing_days, planted_date, &local_today()?.to_string())
}

/// Days until the early harvest date as of `today`
#[wasm_bindgen]
pub fn days_until_harvest_on(
    growing_days: Option<String>,
    planted_date: &str,
    today: &str,
) -> Result<i64, JsValue> {
    let range = GrowingDaysRange::parse(growing_days.as_deref());
    Ok(shared::days_until_harvest(
        range,
        parse_date(planted_date)?,
        parse_date(today)?,
    ))
}

/// Fractional hours between two RFC 3339 timestamps
#[wasm_bindgen]
pub fn calculate_hours_worked(clock_in: &str, clock_out: &str) -> Result<f64, JsValue> {
    let clock_in = parse_instant(clock_in)?;
    let clock_out = parse_instant(clock_out)?;
    validate_clock_sequence(clock_in, clock_out).map_err(JsValue::from_str)?;
    Ok(hours_between(clock_in, clock_out))
}

/// Band key for a day's hours: regular, warning, overtime or excessive
#[wasm_bindgen]
pub fn classify_hours(hours: f64) -> Result<String, JsValue> {
    let band = serde_json::to_value(HoursBand::classify(hours))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))?;
    Ok(band.as_str().unwrap_or_default().to_string())
}

/// Render hours as "8h 30m"
#[wasm_bindgen]
pub fn format_hours_worked(hours: f64) -> String {
    format_hours(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_growing_days() {
        assert_eq!(
            parse_growing_days(Some("75-85 days".to_string())).unwrap(),
            r#"{"early":75,"late":85}"#
        );
        assert_eq!(parse_growing_days(None).unwrap(), r#"{"early":0,"late":0}"#);
    }

    #[test]
    fn test_estimate_harvest() {
        let json = estimate_harvest(Some("75-85".to_string()), "2024-01-01").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["early_date"], "2024-03-16");
        assert_eq!(value["range_text"], "mid March to late March");
    }

    #[test]
    fn test_harvest_calendar() {
        let json = harvest_calendar(Some("75-85".to_string()), "2024-03-05", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["21"], "best");
        assert_eq!(value["19"], "good");
        assert_eq!(value["1"], "off_season");

        let zoned = harvest_calendar(Some("75-85".to_string()), "2024-03-05", Some("6b".to_string()));
        assert_eq!(zoned.unwrap(), json);
    }

    #[test]
    fn test_days_until_harvest_on() {
        let days = days_until_harvest_on(Some("75".to_string()), "2024-01-01", "2024-03-06").unwrap();
        assert_eq!(days, 10);
        let days = days_until_harvest_on(Some("75".to_string()), "2024-01-01", "2024-06-01").unwrap();
        assert_eq!(days, 0);
    }

    #[test]
    fn test_calculate_hours_worked() {
        let hours =
            calculate_hours_worked("2024-06-03T08:00:00Z", "2024-06-03T16:30:00Z").unwrap();
        assert!((hours - 8.5).abs() < 1e-9);
    }

    #[test]
    fn test_classify_hours() {
        assert_eq!(classify_hours(7.9).unwrap(), "regular");
        assert_eq!(classify_hours(8.5).unwrap(), "warning");
        assert_eq!(classify_hours(9.0).unwrap(), "overtime");
        assert_eq!(classify_hours(12.0).unwrap(), "excessive");
    }

    #[test]
    fn test_format_hours_worked() {
        assert_eq!(format_hours_worked(8.5), "8h 30m");
        assert_eq!(format_hours_worked(0.0), "0h 0m");
    }
}

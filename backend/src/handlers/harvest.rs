//! Stateless harvest estimate handlers
//!
//! These work from raw growing-days text so clients can preview a planting
//! before a cultivar or grow is saved.

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{GrowingDaysRange, HarvestBucket, HarvestOutlook};

use crate::error::AppError;
use crate::AppState;

/// Request body for a harvest estimate
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub growing_days: Option<String>,
    pub planted_date: NaiveDate,
    /// Defaults to the farm's current date
    pub today: Option<NaiveDate>,
}

/// Request body for a harvest calendar
#[derive(Debug, Deserialize)]
pub struct CalendarRequest {
    pub growing_days: Option<String>,
    pub planted_date: NaiveDate,
    pub usda_zone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub growing_days: GrowingDaysRange,
    pub weeks: BTreeMap<u32, HarvestBucket>,
}

/// Estimate harvest dates for a planting
pub async fn estimate_harvest(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> impl IntoResponse {
    let range = GrowingDaysRange::parse(request.growing_days.as_deref());
    let today = request.today.unwrap_or_else(|| state.today());

    (
        StatusCode::OK,
        Json(HarvestOutlook::new(range, request.planted_date, today)),
    )
}

/// Week-by-week harvest heat map for a planting
pub async fn harvest_calendar(Json(request): Json<CalendarRequest>) -> impl IntoResponse {
    if let Some(zone) = request.usda_zone.as_deref() {
        if let Err(msg) = shared::validate_usda_zone(zone) {
            return AppError::validation("usda_zone", msg).into_response();
        }
    }

    let range = GrowingDaysRange::parse(request.growing_days.as_deref());
    let weeks = shared::calendar_buckets(range, request.planted_date, request.usda_zone.as_deref());

    (
        StatusCode::OK,
        Json(CalendarResponse {
            growing_days: range,
            weeks,
        }),
    )
        .into_response()
}

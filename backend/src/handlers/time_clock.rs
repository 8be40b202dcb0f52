//! Time clock HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::DateRange;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HoursQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Clock a worker in
pub async fn clock_in(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = state.time_clock_service();

    match service.clock_in(worker_id, Utc::now()).await {
        Ok(block) => (StatusCode::CREATED, Json(block)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Clock a worker out
pub async fn clock_out(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = state.time_clock_service();

    match service.clock_out(worker_id, Utc::now()).await {
        Ok(block) => (StatusCode::OK, Json(block)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Blocks and totals for a worker on a given date
pub async fn get_worker_day(
    State(state): State<AppState>,
    Path((worker_id, date)): Path<(Uuid, NaiveDate)>,
) -> impl IntoResponse {
    let service = state.time_clock_service();

    match service.get_day(worker_id, date, Utc::now()).await {
        Ok(day) => (StatusCode::OK, Json(day)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Daily hour summaries for a worker over a date range
pub async fn get_worker_hours(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Query(query): Query<HoursQuery>,
) -> impl IntoResponse {
    let service = state.time_clock_service();
    let range = DateRange::new(query.start, query.end);

    match service.get_range_summaries(worker_id, range, Utc::now()).await {
        Ok(days) => (StatusCode::OK, Json(serde_json::json!({ "days": days }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a finalized time block
pub async fn delete_time_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = state.time_clock_service();

    match service.delete_block(block_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Workers currently clocked in, with live hours
pub async fn list_active_workers(State(state): State<AppState>) -> impl IntoResponse {
    let service = state.time_clock_service();

    match service.active_workers(Utc::now()).await {
        Ok(workers) => (StatusCode::OK, Json(serde_json::json!({ "active": workers }))).into_response(),
        Err(e) => e.into_response(),
    }
}

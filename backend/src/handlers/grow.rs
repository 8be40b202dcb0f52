//! Grow HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::grow::{CreateGrowInput, GrowService};
use crate::AppState;

/// List all grows with harvest outlooks
pub async fn list_grows(State(state): State<AppState>) -> impl IntoResponse {
    let service = GrowService::new(state.db.clone());

    match service.list_grows(state.today()).await {
        Ok(grows) => (StatusCode::OK, Json(serde_json::json!({ "grows": grows }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a grow with its harvest outlook
pub async fn get_grow(
    State(state): State<AppState>,
    Path(grow_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = GrowService::new(state.db.clone());

    match service.get_grow(grow_id, state.today()).await {
        Ok(grow) => (StatusCode::OK, Json(grow)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get the harvest heat-map calendar for a grow
pub async fn get_grow_calendar(
    State(state): State<AppState>,
    Path(grow_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = GrowService::new(state.db.clone());

    match service.get_calendar(grow_id).await {
        Ok(calendar) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a planting
pub async fn create_grow(
    State(state): State<AppState>,
    Json(input): Json<CreateGrowInput>,
) -> impl IntoResponse {
    let service = GrowService::new(state.db.clone());

    match service.create_grow(input, state.today()).await {
        Ok(grow) => (StatusCode::CREATED, Json(grow)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a grow
pub async fn delete_grow(
    State(state): State<AppState>,
    Path(grow_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = GrowService::new(state.db.clone());

    match service.delete_grow(grow_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

//! Cultivar HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::cultivar::{
    CreateCultivarInput, CultivarService, CultivarView, UpdateCultivarInput,
};
use crate::AppState;

/// List all cultivars
pub async fn list_cultivars(State(state): State<AppState>) -> impl IntoResponse {
    let service = CultivarService::new(state.db.clone());

    match service.list_cultivars().await {
        Ok(cultivars) => (StatusCode::OK, Json(serde_json::json!({ "cultivars": cultivars }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific cultivar
pub async fn get_cultivar(
    State(state): State<AppState>,
    Path(cultivar_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CultivarService::new(state.db.clone());

    match service.get_cultivar(cultivar_id).await {
        Ok(cultivar) => (StatusCode::OK, Json(CultivarView::from(cultivar))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a cultivar
pub async fn create_cultivar(
    State(state): State<AppState>,
    Json(input): Json<CreateCultivarInput>,
) -> impl IntoResponse {
    let service = CultivarService::new(state.db.clone());

    match service.create_cultivar(input).await {
        Ok(cultivar) => (StatusCode::CREATED, Json(cultivar)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a cultivar
pub async fn update_cultivar(
    State(state): State<AppState>,
    Path(cultivar_id): Path<Uuid>,
    Json(input): Json<UpdateCultivarInput>,
) -> impl IntoResponse {
    let service = CultivarService::new(state.db.clone());

    match service.update_cultivar(cultivar_id, input).await {
        Ok(cultivar) => (StatusCode::OK, Json(cultivar)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a cultivar
pub async fn delete_cultivar(
    State(state): State<AppState>,
    Path(cultivar_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CultivarService::new(state.db.clone());

    match service.delete_cultivar(cultivar_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

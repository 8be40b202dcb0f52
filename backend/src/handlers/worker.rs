//! Worker roster HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::worker::{CreateWorkerInput, UpdateWorkerInput, WorkerService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WorkerListQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// List workers
pub async fn list_workers(
    State(state): State<AppState>,
    Query(query): Query<WorkerListQuery>,
) -> impl IntoResponse {
    let service = WorkerService::new(state.db.clone());

    match service.list_workers(query.active_only).await {
        Ok(workers) => (StatusCode::OK, Json(serde_json::json!({ "workers": workers }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific worker
pub async fn get_worker(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = WorkerService::new(state.db.clone());

    match service.get_worker(worker_id).await {
        Ok(worker) => (StatusCode::OK, Json(worker)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Add a worker
pub async fn create_worker(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkerInput>,
) -> impl IntoResponse {
    let service = WorkerService::new(state.db.clone());

    match service.create_worker(input).await {
        Ok(worker) => (StatusCode::CREATED, Json(worker)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a worker
pub async fn update_worker(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Json(input): Json<UpdateWorkerInput>,
) -> impl IntoResponse {
    let service = WorkerService::new(state.db.clone());

    match service.update_worker(worker_id, input).await {
        Ok(worker) => (StatusCode::OK, Json(worker)).into_response(),
        Err(e) => e.into_response(),
    }
}

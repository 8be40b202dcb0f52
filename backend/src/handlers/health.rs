//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub database: &'static str,
}

/// Health check endpoint; 503 when the database is unreachable
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_up = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    let (status, body) = if database_up {
        (StatusCode::OK, ("healthy", "connected"))
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, ("degraded", "disconnected"))
    };

    (
        status,
        Json(HealthResponse {
            status: body.0,
            version: env!("CARGO_PKG_VERSION"),
            environment: state.config.environment.clone(),
            database: body.1,
        }),
    )
}

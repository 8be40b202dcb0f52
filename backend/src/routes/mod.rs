//! Route definitions for the Farm Operations Platform

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stateless harvest calculators
        .nest("/harvest", harvest_routes())
        // Crop reference data
        .nest("/cultivars", cultivar_routes())
        // Plantings
        .nest("/grows", grow_routes())
        // Worker roster and per-worker time clock
        .nest("/workers", worker_routes())
        // Time block maintenance
        .route("/time-blocks/:block_id", delete(handlers::delete_time_block))
        // Dashboard
        .route("/time-clock/active", get(handlers::list_active_workers))
}

/// Harvest calculator routes
fn harvest_routes() -> Router<AppState> {
    Router::new()
        .route("/estimate", post(handlers::estimate_harvest))
        .route("/calendar", post(handlers::harvest_calendar))
}

/// Cultivar management routes
fn cultivar_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_cultivars).post(handlers::create_cultivar))
        .route(
            "/:cultivar_id",
            get(handlers::get_cultivar)
                .put(handlers::update_cultivar)
                .delete(handlers::delete_cultivar),
        )
}

/// Grow management routes
fn grow_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_grows).post(handlers::create_grow))
        .route(
            "/:grow_id",
            get(handlers::get_grow).delete(handlers::delete_grow),
        )
        .route("/:grow_id/calendar", get(handlers::get_grow_calendar))
}

/// Worker and time clock routes
fn worker_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_workers).post(handlers::create_worker))
        .route(
            "/:worker_id",
            get(handlers::get_worker).put(handlers::update_worker),
        )
        .route("/:worker_id/clock-in", post(handlers::clock_in))
        .route("/:worker_id/clock-out", post(handlers::clock_out))
        .route("/:worker_id/hours", get(handlers::get_worker_hours))
        .route("/:worker_id/days/:date", get(handlers::get_worker_day))
}

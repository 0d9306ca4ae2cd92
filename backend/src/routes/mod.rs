//! Route definitions for the Ranch Irrigation Scheduler

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/ranches", ranch_routes())
        .nest("/blocks", block_routes())
        .route("/calculate", post(handlers::calculate))
        .route(
            "/meter-readings",
            get(handlers::list_meter_readings).post(handlers::create_meter_reading),
        )
        .route("/weather", get(handlers::get_weather))
}

/// Ranch, set, well and ranch-level scheduling routes
fn ranch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_ranches).post(handlers::create_ranch))
        .route("/:ranch_id", get(handlers::get_ranch))
        .route(
            "/:ranch_id/sets",
            get(handlers::list_sets).post(handlers::create_set),
        )
        .route(
            "/:ranch_id/wells",
            get(handlers::list_wells).post(handlers::create_well),
        )
        .route(
            "/:ranch_id/blocks",
            get(handlers::list_blocks).post(handlers::create_block),
        )
        .route("/:ranch_id/schedules", post(handlers::apply_schedule))
        .route("/:ranch_id/schedule-plan", get(handlers::get_schedule_plan))
        .route("/:ranch_id/allocation", get(handlers::get_allocation))
        .route("/:ranch_id/report", get(handlers::get_ranch_report))
}

/// Block routes
fn block_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:block_id",
            get(handlers::get_block).put(handlers::update_block),
        )
        .route("/:block_id/history", get(handlers::get_block_history))
}

//! REST API implementation for the diagnostics daemon

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check (no prefix for health endpoint)
        .route("/health", get(handlers::health))
        // API v1 routes
        .nest(
            "/api/v1",
            Router::new()
                .route("/avdecoderstatus", get(handlers::get_av_decoder_status))
                .route("/configuration", post(handlers::get_configuration))
                .route("/milestones", get(handlers::get_milestones))
                .route("/milestones", post(handlers::log_milestone))
                .route("/events", get(handlers::sse_handler)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Router configuration for the web server.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::handle_panic;
use super::handlers;
use super::rate_limit::limit_requests;
use super::AppState;

/// Request body ceiling: two 5MB documents plus the answers field.
pub const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route_layer(middleware::from_fn_with_state(state.clone(), limit_requests))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

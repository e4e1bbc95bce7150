//! Service endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::super::error::ApiError;
use super::super::AppState;

/// Health check endpoint for container orchestration.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "ocrConfigured": state.analysis.ocr_configured(),
        "aiConfigured": state.analysis.ai_configured(),
    }))
}

/// JSON 404 for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

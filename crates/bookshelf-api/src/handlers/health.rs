//! Health check and welcome handlers.

use axum::Json;
use axum::extract::State;

use bookshelf_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /
pub async fn welcome() -> &'static str {
    "Book Management System - Welcome to the API server."
}

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    if !state.db.health_check().await? {
        return Err(AppError::service_unavailable("Database is not responding").into());
    }

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: "connected".to_string(),
    })))
}

//! Common routes: health and the JSON fallbacks for unknown paths and methods.

use crate::error::AppError;
use crate::response::HealthBody;
use axum::{routing::get, Json, Router};

async fn health() -> Json<HealthBody> {
    Json(HealthBody::healthy())
}

pub(crate) async fn not_found() -> AppError {
    AppError::RouteNotFound
}

pub(crate) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Common routes (no state): GET /health. Always healthy; the store is not consulted.
pub fn common_routes() -> Router {
    Router::new().route("/health", get(health))
}

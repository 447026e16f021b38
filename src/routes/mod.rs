//! Route tables and the layered application router.

mod common;
mod students;

pub use common::common_routes;
pub use students::student_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Full service: `/health`, `/api/students...`, JSON 404/405 for anything else. Requests are
/// traced, any origin may call the API, and JSON bodies above `body_limit` bytes are refused
/// with a 413 error body.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .nest("/api", student_routes(state).fallback(common::not_found))
        .fallback(common::not_found)
        .method_not_allowed_fallback(common::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}

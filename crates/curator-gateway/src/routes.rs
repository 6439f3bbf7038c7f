//! HTTP route definitions

use crate::{handlers, middleware, AppState};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the main router
///
/// The origin guard is the innermost layer so rejected requests still
/// pass through logging and pick up a request id on the way out.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Upload endpoints
        .route("/initiate", post(handlers::initiate_upload))
        .route("/complete", post(handlers::complete_upload))
        // Moderation endpoints
        .route("/sync-approved-members", post(handlers::sync_approved_members))
        // Service endpoints
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        // Apply middleware
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&state),
            middleware::origin_guard,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .with_state(state)
}

//! Service-level handlers

use axum::http::{StatusCode, Uri};

use crate::ApiError;

/// GET /health - liveness probe
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

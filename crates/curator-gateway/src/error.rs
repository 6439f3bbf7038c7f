//! Error types and HTTP status mappings

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use curator_storage::StorageError;
use serde_json::json;
use thiserror::Error;

/// API error type
///
/// Every failure a handler can produce maps onto one of these, so the
/// status code and the `{error, details?}` body shape are decided in a
/// single place.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing request fields
    #[error("{0}")]
    Validation(String),

    /// Origin not in the allow-list
    #[error("Unauthorized origin")]
    UnauthorizedOrigin,

    /// Unknown endpoint
    #[error("no route for {0}")]
    NotFound(String),

    /// Backend call failed
    #[error("upstream error: {0}")]
    Upstream(#[from] StorageError),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnauthorizedOrigin => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(StorageError::InvalidResponse(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self, "Request failed");
        }

        let body = match &self {
            Self::Validation(message) => json!({ "error": message }),
            Self::UnauthorizedOrigin => json!({ "error": "Unauthorized origin" }),
            Self::NotFound(path) => json!({
                "error": "Not found",
                "details": format!("no route for {}", path),
            }),
            Self::Upstream(storage) => json!({
                "error": "Upstream storage error",
                "details": storage.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_origin_body() {
        let response = ApiError::UnauthorizedOrigin.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_of(response).await;
        assert_eq!(body, json!({ "error": "Unauthorized origin" }));
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let response = ApiError::validation("fileName is required").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body["error"], "fileName is required");
    }

    #[tokio::test]
    async fn test_upstream_carries_backend_message() {
        let error = ApiError::from(StorageError::Upstream {
            status: 500,
            message: "backend exploded".to_string(),
        });
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_of(response).await;
        assert_eq!(body["error"], "Upstream storage error");
        assert!(body["details"].as_str().unwrap().contains("backend exploded"));
    }

    #[test]
    fn test_malformed_backend_response_is_500() {
        let error = ApiError::from(StorageError::InvalidResponse("bad json".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

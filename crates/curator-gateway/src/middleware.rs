//! HTTP middleware for origin checks, request ids and logging

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{ApiError, AppState};

/// Methods the gateway answers for browser clients
const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
/// Request headers browsers may send
const ALLOWED_HEADERS: &str = "Content-Type";
/// How long browsers may cache a preflight answer, in seconds
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Origin allow-list middleware
///
/// Every request must carry an `Origin` header that exactly matches an
/// entry on the allow-list; anything else is rejected before reaching a
/// handler. Preflight requests from allowed origins are answered here
/// directly. `/health` is exempt so probes without an Origin work.
pub async fn origin_guard(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let origin_header = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());

    let origin = match origin_header {
        Some(origin) if state.config.origin_allowed(origin) => origin.to_string(),
        Some(origin) => {
            tracing::warn!(origin = %origin, "Rejected request from unlisted origin");
            return Err(ApiError::UnauthorizedOrigin);
        }
        None => {
            tracing::warn!("Rejected request without an Origin header");
            return Err(ApiError::UnauthorizedOrigin);
        }
    };

    if request.method() == Method::OPTIONS {
        return Ok(preflight_response(&origin));
    }

    let mut response = next.run(request).await;
    echo_origin(response.headers_mut(), &origin);
    Ok(response)
}

/// Answer a preflight request from an allowed origin
fn preflight_response(origin: &str) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(PREFLIGHT_MAX_AGE),
    );
    echo_origin(headers, origin);
    response
}

/// Echo the caller's origin back on a response
fn echo_origin(headers: &mut HeaderMap, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}

/// Request ID middleware - adds x-request-id header
pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert("x-request-id", request_id.parse().unwrap());
    response
}

/// Request ID extension
#[derive(Clone, Default)]
pub struct RequestId(pub String);

/// Logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .cloned()
        .unwrap_or_default();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        request_id = %request_id.0,
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_response_advertises_capabilities() {
        let response = preflight_response("https://gallery.example.org");

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://gallery.example.org"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[test]
    fn test_echo_origin_sets_vary() {
        let mut headers = HeaderMap::new();
        echo_origin(&mut headers, "https://gallery.example.org");

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://gallery.example.org");
        assert_eq!(headers[header::VARY], "Origin");
    }
}

//! CORS policy.
//!
//! Every response carries the CORS headers. The allowed origin is the
//! caller's own when it is on the allow-list, otherwise the first
//! allow-listed origin. Preflight `OPTIONS` requests are answered here with
//! 200 and an empty body, before routing, auth or validation.

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
/// Preflight cache lifetime: 24 hours.
pub const MAX_AGE_SECS: &str = "86400";

/// CORS headers for a request from `origin`.
pub fn cors_headers(origin: Option<&str>, allowed: &[String]) -> HeaderMap {
    let allowed_origin = origin
        .filter(|o| allowed.iter().any(|a| a == o))
        .or_else(|| allowed.first().map(String::as_str));

    let mut headers = HeaderMap::new();
    if let Some(value) = allowed_origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
    headers
}

/// Middleware applying [`cors_headers`] to every response.
pub async fn cors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let headers = cors_headers(
        request.headers().get(ORIGIN).and_then(|v| v.to_str().ok()),
        &state.config.cors_origins,
    );

    let mut response = if *request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    response.headers_mut().extend(headers);
    response
}

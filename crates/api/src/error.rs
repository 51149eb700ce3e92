use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kontrola_core::error::CoreError;
use kontrola_db::WriteError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`WriteError`] for rejected
/// writes, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce the JSON error envelopes the admin panel expects.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `kontrola_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body is not valid JSON.
    #[error("Invalid JSON body")]
    InvalidJson,

    /// The resource does not answer this method.
    #[error("Method {method} not allowed")]
    MethodNotAllowed {
        method: String,
        allow: &'static [&'static str],
    },

    /// A write that did not happen. `message` is the caller-facing summary
    /// (e.g. "Failed to save partner").
    #[error("{message}: {source}")]
    Write {
        message: &'static str,
        source: WriteError,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Adapter for `map_err` on repository writes.
    pub fn write(message: &'static str) -> impl FnOnce(WriteError) -> AppError {
        move |source| AppError::Write { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(errors) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Validation failed", "errors": errors })),
                )
                    .into_response(),
                CoreError::Unauthorized => {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })))
                        .into_response()
                }
                CoreError::MissingId => {
                    (StatusCode::BAD_REQUEST, Json(json!({ "error": "Missing id" })))
                        .into_response()
                }
                CoreError::BadRequest(message) => {
                    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
                }
            },

            AppError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON body" })),
            )
                .into_response(),

            AppError::MethodNotAllowed { method, allow } => {
                let mut response = (
                    StatusCode::METHOD_NOT_ALLOWED,
                    Json(json!({ "error": format!("Method {method} not allowed") })),
                )
                    .into_response();
                if let Ok(value) = HeaderValue::from_str(&allow.join(", ")) {
                    response.headers_mut().insert(ALLOW, value);
                }
                response
            }

            AppError::Write { message, source } => {
                let mut body = json!({ "error": message, "reason": source.reason() });
                if let Some(detail) = source.detail() {
                    body["detail"] = json!(detail);
                }
                if let Some(code) = source.code() {
                    body["code"] = json!(code);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

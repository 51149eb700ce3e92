use std::time::Duration;

use axum::http::{HeaderName, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::middleware::cors::cors;
use crate::routes;
use crate::state::AppState;

/// Build the full application router with every middleware layer.
///
/// Shared by `main.rs` and the integration tests so both exercise the same
/// stack (CORS, request ID, timeout, tracing, panic recovery).
///
/// Trailing slashes are trimmed before routing, so `/api/partners/` and
/// `/api/partners/4/` reach the same handlers as their bare forms.
pub fn build_app(state: AppState) -> Router {
    Router::new().fallback_service(NormalizePath::trim_trailing_slash(routed_app(state)))
}

fn routed_app(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .nest("/api", routes::api_routes())
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500.
        .layer(CatchPanicLayer::new())
        // Request timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // CORS on every response, including errors; answers preflights.
        .layer(from_fn_with_state(state.clone(), cors))
        .with_state(state)
}

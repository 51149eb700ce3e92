use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::Router;
use kontrola_core::upload::MAX_UPLOAD_BODY_BYTES;

use crate::handlers::{partners, upload};
use crate::state::AppState;

/// Partner routes mounted at `/api/partners`.
///
/// ```text
/// ANY /upload  -> upload (body limit raised for base64 logos)
/// ANY /        -> collection
/// ANY /{id}    -> member
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            any(upload::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        .route("/", any(partners::collection))
        .route("/{id}", any(partners::member))
}

use axum::routing::any;
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Notification routes mounted at `/api/notifications`.
///
/// Method dispatch happens in the handler so unsupported methods get the
/// JSON 405 envelope.
///
/// ```text
/// ANY /      -> collection
/// ANY /{id}  -> member
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", any(notifications::collection))
        .route("/{id}", any(notifications::member))
}

use axum::routing::any;
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Statistics routes mounted at `/api/statistics`.
///
/// ```text
/// ANY /       -> public
/// ANY /admin  -> admin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", any(statistics::public))
        .route("/admin", any(statistics::admin))
}

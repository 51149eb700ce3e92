pub mod health;
pub mod notifications;
pub mod partners;
pub mod statistics;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                          liveness + store config (GET)
///
/// /notifications                   list (public: active only), create (admin)
/// /notifications/{id}              update, delete (admin); also ?id=
///
/// /partners                        list (public: active only), save (admin)
/// /partners/{id}                   update, delete (admin); also ?id=
/// /partners/upload                 logo upload (admin, POST)
///
/// /statistics                      read (public), save (admin)
/// /statistics/admin                raw read, save (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/notifications", notifications::router())
        .nest("/partners", partners::router())
        .nest("/statistics", statistics::router())
}

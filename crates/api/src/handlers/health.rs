use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::response::IntoResponse;
use axum::Json;
use chrono::SecondsFormat;
use kontrola_db::EnvSummary;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`: the process is serving.
    pub status: &'static str,
    pub supabase: StoreStatus,
    /// RFC 3339 UTC.
    pub timestamp: String,
}

/// Which store capabilities are configured.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub initialized: bool,
    /// The service-role key is present, even when a missing URL leaves the
    /// store itself unconfigured.
    pub service_role: bool,
    pub env: EnvSummary,
}

/// GET /api/health -- liveness plus store configuration visibility.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok",
        supabase: StoreStatus {
            initialized: state.store.is_initialized(),
            service_role: state.store.has_service_role()
                || state.config.supabase.service_role_key.is_some(),
            env: state.config.supabase.env_summary(),
        },
        timestamp: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    ([(CACHE_CONTROL, "no-store")], Json(body))
}

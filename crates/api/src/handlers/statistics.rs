//! Handlers for the site statistics singleton.
//!
//! `/api/statistics` is public for reads and adds the derived
//! `yearsExperience`. `/api/statistics/admin` is admin-only for both reads
//! and writes and returns the stored values as they are.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kontrola_core::validation::{current_year, validate_statistics};
use kontrola_db::models::statistics::{StatisticsInput, StatisticsView};
use kontrola_db::repositories::StatisticsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminStatus;
use crate::resource::{from_payload, json_body, ResourceMethod, SingletonMethod};
use crate::response::Ack;
use crate::state::AppState;

/// `/api/statistics`
pub async fn public(
    State(state): State<AppState>,
    method: Method,
    admin: AdminStatus,
    body: Bytes,
) -> AppResult<Response> {
    match SingletonMethod::parse(&method)? {
        SingletonMethod::Options => Ok(StatusCode::OK.into_response()),
        SingletonMethod::Get => {
            let stats = StatisticsRepo::get(&state.store).await;
            Ok(Json(StatisticsView::new(&stats, current_year())).into_response())
        }
        SingletonMethod::Put => save(&state, admin, &body).await,
    }
}

/// `/api/statistics/admin`
pub async fn admin(
    State(state): State<AppState>,
    method: Method,
    admin: AdminStatus,
    body: Bytes,
) -> AppResult<Response> {
    match SingletonMethod::parse(&method)? {
        SingletonMethod::Options => Ok(StatusCode::OK.into_response()),
        SingletonMethod::Get => {
            admin.require()?;
            Ok(Json(StatisticsRepo::get(&state.store).await).into_response())
        }
        SingletonMethod::Put => save(&state, admin, &body).await,
    }
}

async fn save(state: &AppState, admin: AdminStatus, body: &Bytes) -> AppResult<Response> {
    admin.require()?;
    let payload = json_body(body)?;
    validate_statistics(&payload, current_year()).into_result()?;
    let input: StatisticsInput = from_payload(payload)?;

    StatisticsRepo::save(&state.store, &input)
        .await
        .map_err(AppError::write("Failed to save statistics"))?;

    tracing::info!("Statistics saved");
    Ok(Json(Ack::ok()).into_response())
}

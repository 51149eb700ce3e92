//! Handlers for partner logos shown on the public page.
//!
//! Every write validates and stores the *effective* partner: the request
//! overlaid on the stored row, so an omitted `logoUrl` keeps the uploaded
//! logo.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kontrola_core::error::CoreError;
use kontrola_core::validation::validate_partner;
use kontrola_db::models::partner::{effective_partner, PartnerInput};
use kontrola_db::repositories::PartnerRepo;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminStatus;
use crate::resource::{
    from_payload, json_body, json_object, payload_id, resolve_id, CrudMethod, IdQuery,
    ResourceMethod,
};
use crate::response::Ack;
use crate::state::AppState;

/// `/api/partners`
pub async fn collection(
    State(state): State<AppState>,
    method: Method,
    admin: AdminStatus,
    query: IdQuery,
    body: Bytes,
) -> AppResult<Response> {
    dispatch(&state, &method, admin, resolve_id(query, None), body).await
}

/// `/api/partners/{id}`
pub async fn member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    admin: AdminStatus,
    query: IdQuery,
    body: Bytes,
) -> AppResult<Response> {
    dispatch(&state, &method, admin, resolve_id(query, Some(id)), body).await
}

async fn dispatch(
    state: &AppState,
    method: &Method,
    admin: AdminStatus,
    id: Option<String>,
    body: Bytes,
) -> AppResult<Response> {
    match CrudMethod::parse(method)? {
        CrudMethod::Options => Ok(StatusCode::OK.into_response()),

        CrudMethod::Get => {
            let list = PartnerRepo::list(&state.store, !admin.is_admin).await;
            Ok(Json(list).into_response())
        }

        // POST answers 200, not 201.
        CrudMethod::Post => {
            admin.require()?;
            let payload = json_body(&body)?;
            let body_id = payload_id(&payload);
            let input =
                effective_input(state, body_id, json_object(payload)?, "Failed to save partner")
                    .await?;

            PartnerRepo::upsert(&state.store, &input)
                .await
                .map_err(AppError::write("Failed to save partner"))?;

            tracing::info!(id = ?input.id, name = ?input.name, "Partner saved");
            Ok(Json(Ack::ok()).into_response())
        }

        CrudMethod::Put => {
            admin.require()?;
            let id = id.ok_or(CoreError::MissingId)?;
            let mut incoming = json_object(json_body(&body)?)?;
            incoming.insert("id".into(), Value::String(id.clone()));
            let input =
                effective_input(state, Some(id.clone()), incoming, "Failed to update partner")
                    .await?;

            PartnerRepo::upsert(&state.store, &input)
                .await
                .map_err(AppError::write("Failed to update partner"))?;

            tracing::info!(%id, "Partner updated");
            Ok(Json(Ack::ok()).into_response())
        }

        CrudMethod::Delete => {
            admin.require()?;
            let id = id.ok_or(CoreError::MissingId)?;

            PartnerRepo::delete(&state.store, &id)
                .await
                .map_err(AppError::write("Failed to delete partner"))?;

            tracing::info!(%id, "Partner deleted");
            Ok(Json(Ack::ok()).into_response())
        }
    }
}

/// Merge `incoming` over the stored partner `id` (if any), validate the
/// result and turn it into the write DTO.
///
/// The stored row is read before validating; a failed read is reported
/// under `failure` like the write it precedes.
async fn effective_input(
    state: &AppState,
    id: Option<String>,
    incoming: Map<String, Value>,
    failure: &'static str,
) -> AppResult<PartnerInput> {
    let existing = match &id {
        Some(id) => PartnerRepo::find_by_id(&state.store, id)
            .await
            .map_err(AppError::write(failure))?,
        None => None,
    };

    let effective = effective_partner(existing.as_ref(), &incoming);
    validate_partner(&effective).into_result()?;
    from_payload(effective)
}

//! Handlers for site notifications (announcement banners).

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kontrola_core::error::CoreError;
use kontrola_core::validation::{validate_notification, Intent};
use kontrola_db::models::notification::NotificationInput;
use kontrola_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminStatus;
use crate::resource::{
    from_payload, json_body, payload_id, resolve_id, CrudMethod, IdQuery, ResourceMethod,
};
use crate::response::Ack;
use crate::state::AppState;

/// `/api/notifications`
pub async fn collection(
    State(state): State<AppState>,
    method: Method,
    admin: AdminStatus,
    query: IdQuery,
    body: Bytes,
) -> AppResult<Response> {
    dispatch(&state, &method, admin, resolve_id(query, None), body).await
}

/// `/api/notifications/{id}`
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

        // Admins also see inactive notifications.
        CrudMethod::Get => {
            let list = NotificationRepo::list(&state.store, !admin.is_admin).await;
            Ok(Json(list).into_response())
        }

        CrudMethod::Post => {
            admin.require()?;
            let payload = json_body(&body)?;
            let intent = match payload_id(&payload) {
                Some(_) => Intent::Update,
                None => Intent::Create,
            };
            validate_notification(&payload, intent).into_result()?;
            let input: NotificationInput = from_payload(payload)?;

            NotificationRepo::upsert(&state.store, &input)
                .await
                .map_err(AppError::write("Failed to create notification"))?;

            tracing::info!(id = ?input.id, "Notification saved");
            Ok((StatusCode::CREATED, Json(Ack::ok())).into_response())
        }

        CrudMethod::Put => {
            admin.require()?;
            let id = id.ok_or(CoreError::MissingId)?;
            let payload = json_body(&body)?;
            validate_notification(&payload, Intent::Update).into_result()?;
            let input: NotificationInput = from_payload(payload)?;

            NotificationRepo::update(&state.store, &id, &input)
                .await
                .map_err(AppError::write("Failed to update notification"))?;

            tracing::info!(%id, "Notification updated");
            Ok(Json(Ack::ok()).into_response())
        }

        CrudMethod::Delete => {
            admin.require()?;
            let id = id.ok_or(CoreError::MissingId)?;

            NotificationRepo::delete(&state.store, &id)
                .await
                .map_err(AppError::write("Failed to delete notification"))?;

            tracing::info!(%id, "Notification deleted");
            Ok(Json(Ack::ok()).into_response())
        }
    }
}

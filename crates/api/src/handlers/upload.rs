//! Partner logo upload: base64 payload in, public object URL out.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kontrola_core::error::CoreError;
use kontrola_core::upload::decode_logo;
use kontrola_db::repositories::LogoRepo;
use kontrola_db::WriteError;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminStatus;
use crate::resource::{from_payload, json_body, ResourceMethod, UploadMethod};
use crate::response::UploadResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogoUpload {
    file_name: Option<String>,
    file_type: Option<String>,
    data_base64: Option<String>,
}

/// `/api/partners/upload`
pub async fn upload(
    State(state): State<AppState>,
    method: Method,
    admin: AdminStatus,
    body: Bytes,
) -> AppResult<Response> {
    match UploadMethod::parse(&method)? {
        UploadMethod::Options => Ok(StatusCode::OK.into_response()),
        UploadMethod::Post => {
            admin.require()?;
            if !state.store.is_initialized() || !state.store.has_service_role() {
                return Err(AppError::Write {
                    message: "Missing Supabase service role",
                    source: WriteError::MissingServiceRole,
                });
            }

            let request: LogoUpload = from_payload(json_body(&body)?)?;
            let (Some(file_name), Some(data)) = (
                request.file_name.filter(|s| !s.is_empty()),
                request.data_base64.filter(|s| !s.is_empty()),
            ) else {
                return Err(CoreError::BadRequest("fileName and dataBase64 are required".into()).into());
            };

            let bytes = decode_logo(&data)?;
            let size = bytes.len();
            let url = LogoRepo::upload(&state.store, &file_name, request.file_type.as_deref(), bytes)
                .await
                .map_err(AppError::write("Upload failed"))?;

            tracing::info!(%file_name, size, "Partner logo stored");
            Ok(Json(UploadResponse { url }).into_response())
        }
    }
}

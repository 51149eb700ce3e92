//! Shared-secret admin check.
//!
//! Admin callers send `Authorization: Bearer <ADMIN_PASSWORD>`; the bare
//! secret without the prefix is accepted too. There are no sessions or
//! expiry.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use kontrola_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "bearer ";

/// Whether `headers` carry the admin secret. An unset secret denies
/// everyone.
pub fn is_admin(headers: &HeaderMap, secret: Option<&str>) -> bool {
    let Some(secret) = secret.filter(|s| !s.is_empty()) else {
        return false;
    };

    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let token = match header.get(..BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => &header[BEARER_PREFIX.len()..],
        _ => header,
    };

    token == secret
}

/// Admin status of the caller, resolved once per request.
///
/// Never rejects: public routes branch on it and mutating routes call
/// [`AdminStatus::require`] after method dispatch.
///
/// ```ignore
/// async fn handler(admin: AdminStatus) -> AppResult<Json<Ack>> {
///     admin.require()?;
///     Ok(Json(Ack::ok()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminStatus {
    pub is_admin: bool,
}

impl AdminStatus {
    /// Rejects non-admin callers with 401.
    pub fn require(self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Unauthorized))
        }
    }
}

impl FromRequestParts<AppState> for AdminStatus {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AdminStatus {
            is_admin: is_admin(&parts.headers, state.config.admin_password.as_deref()),
        })
    }
}

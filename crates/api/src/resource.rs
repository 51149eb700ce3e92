//! Pieces shared by the resource handlers: the closed method sets, id
//! addressing and JSON body parsing.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::{Method, Uri};
use kontrola_core::error::CoreError;
use kontrola_core::validation::NOT_AN_OBJECT;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// A closed set of methods a resource answers. Anything else is a 405
/// whose `Allow` header lists [`ResourceMethod::ALLOW`].
pub trait ResourceMethod: Sized {
    const ALLOW: &'static [&'static str];

    fn from_method(method: &Method) -> Option<Self>;

    fn parse(method: &Method) -> Result<Self, AppError> {
        Self::from_method(method).ok_or_else(|| AppError::MethodNotAllowed {
            method: method.to_string(),
            allow: Self::ALLOW,
        })
    }
}

/// Methods of the notification and partner collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl ResourceMethod for CrudMethod {
    const ALLOW: &'static [&'static str] = &["GET", "POST", "PUT", "DELETE", "OPTIONS"];

    fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(CrudMethod::Get),
            Method::POST => Some(CrudMethod::Post),
            Method::PUT => Some(CrudMethod::Put),
            Method::DELETE => Some(CrudMethod::Delete),
            Method::OPTIONS => Some(CrudMethod::Options),
            _ => None,
        }
    }
}

/// Methods of the statistics singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonMethod {
    Get,
    Put,
    Options,
}

impl ResourceMethod for SingletonMethod {
    const ALLOW: &'static [&'static str] = &["GET", "PUT", "OPTIONS"];

    fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(SingletonMethod::Get),
            Method::PUT => Some(SingletonMethod::Put),
            Method::OPTIONS => Some(SingletonMethod::Options),
            _ => None,
        }
    }
}

/// Methods of the logo upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMethod {
    Post,
    Options,
}

impl ResourceMethod for UploadMethod {
    const ALLOW: &'static [&'static str] = &["POST", "OPTIONS"];

    fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::POST => Some(UploadMethod::Post),
            Method::OPTIONS => Some(UploadMethod::Options),
            _ => None,
        }
    }
}

/// `?id=` query parameter.
///
/// Never rejects: a query string that cannot be decoded reads as carrying
/// no id, and a repeated `id` keeps its first value. A missing id is
/// reported by the handler after method dispatch and the admin check.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        IdQuery {
            id: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "id").then_some(value)),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for IdQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(IdQuery::from_uri(&parts.uri))
    }
}

/// The addressed id: `?id=` wins over the path segment; blanks are absent.
pub fn resolve_id(query: IdQuery, path_id: Option<String>) -> Option<String> {
    query
        .id
        .into_iter()
        .chain(path_id)
        .map(|id| id.trim().to_string())
        .find(|id| !id.is_empty())
}

/// The `id` carried in a JSON payload, as text.
pub fn payload_id(payload: &Value) -> Option<String> {
    match payload.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a request body. An empty body reads as `{}`.
pub fn json_body(body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|_| AppError::InvalidJson)
}

/// The payload as a JSON object, or the validator's non-object error.
pub fn json_object(payload: Value) -> Result<Map<String, Value>, AppError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(CoreError::Validation(vec![NOT_AN_OBJECT.to_string()]).into()),
    }
}

/// Deserialize an already validated payload into its DTO.
pub fn from_payload<T: DeserializeOwned>(payload: Value) -> Result<T, AppError> {
    serde_json::from_value(payload).map_err(|e| CoreError::BadRequest(e.to_string()).into())
}

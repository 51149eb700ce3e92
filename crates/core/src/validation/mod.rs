//! Input validation for admin payloads.
//!
//! Validators inspect the raw JSON body rather than a typed DTO so that a
//! wrong type is reported as a readable message alongside every other
//! problem, instead of aborting deserialization at the first mismatch.
//!
//! Checks are presence-conditional: a field missing from the payload is
//! not an error unless the entity requires it.

mod notification;
mod partner;
mod statistics;

pub use notification::validate_notification;
pub use partner::validate_partner;
pub use statistics::validate_statistics;

use chrono::Datelike;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::fields::integral;

/// Message used when the body is valid JSON but not an object.
pub const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// Whether the payload creates a new row or changes an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Update,
}

/// Every violation found in one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn not_an_object() -> Self {
        Self {
            errors: vec![NOT_AN_OBJECT.to_string()],
        }
    }

    /// Convert into a `Result`, carrying all messages on failure.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

/// The calendar year used as the upper bound for `yearsExperienceStart`.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// `true` for `http` / `https` absolute URLs.
pub fn is_http_url(candidate: &str) -> bool {
    url::Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// A JSON number without a fractional part, so `2.0` counts as `2`.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => integral(n),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    as_integer(value).is_some()
}

/// An optional string field: absent and `null` are accepted, anything
/// other than a string is reported with `label`.
fn optional_string<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    label: &str,
    report: &mut ValidationReport,
) -> Option<&'a str> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            report.push(format!("{label} must be a string"));
            None
        }
    }
}

fn check_active(obj: &Map<String, Value>, report: &mut ValidationReport) {
    if let Some(active) = obj.get("active") {
        if !active.is_boolean() {
            report.push("Active must be a boolean");
        }
    }
}

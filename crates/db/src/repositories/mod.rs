//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&Store` as the first argument. Reads return plain values and
//! degrade on failure; writes return `Result<_, WriteError>`.

pub mod logo_repo;
pub mod notification_repo;
pub mod partner_repo;
pub mod statistics_repo;

pub use logo_repo::LogoRepo;
pub use notification_repo::NotificationRepo;
pub use partner_repo::PartnerRepo;
pub use statistics_repo::StatisticsRepo;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::{Filter, Row, StoreError, WriteError};

/// Decode rows, skipping (and logging) any the model cannot represent.
fn decode_rows<T: DeserializeOwned>(table: &'static str, rows: Vec<Row>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(Value::Object(row)) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(table, error = %e, "Skipping unreadable row");
                None
            }
        })
        .collect()
}

/// Numeric ids go to the store as numbers, anything else as text.
fn id_value(id: &str) -> Value {
    id.trim()
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(id))
}

fn id_filter(id: &str) -> Filter {
    Filter::eq("id", id_value(id))
}

fn timestamp_now() -> Value {
    Value::String(kontrola_core::types::now().to_rfc3339())
}

/// Write an `Option<Option<T>>` field: absent is skipped, `null` clears.
fn put_nullable(row: &mut Row, column: &str, value: &Option<Option<String>>) {
    if let Some(value) = value {
        row.insert(
            column.to_string(),
            value.clone().map_or(Value::Null, Value::String),
        );
    }
}

fn write_failed(table: &'static str, operation: &'static str, err: StoreError) -> WriteError {
    tracing::error!(
        table,
        operation,
        reason = "db-error",
        detail = %err.message,
        code = ?err.code,
        "Store write failed",
    );
    err.into()
}

//! Repository for the singleton `statistics` row.

use kontrola_core::types::STATISTICS_ROW_ID;
use serde_json::Value;

use super::{decode_rows, timestamp_now, write_failed};
use crate::models::statistics::{Statistics, StatisticsInput, StatisticsRow};
use crate::store::{Filter, Order, Query, Row, Store, StoreError, TableStore, WriteError};

const TABLE: &str = "statistics";

/// Provides data access for site statistics.
pub struct StatisticsRepo;

impl StatisticsRepo {
    /// Read the statistics. Never fails.
    ///
    /// Tries the most recently updated row, then the fixed singleton row,
    /// then the built-in defaults.
    pub async fn get(store: &Store) -> Statistics {
        let Some(tables) = store.reader() else {
            return Statistics::default();
        };

        Self::current(tables).await.unwrap_or_else(|e| {
            tracing::warn!(table = TABLE, error = %e, "Failed to read statistics, serving defaults");
            Statistics::default()
        })
    }

    /// Save a partial update into the singleton row.
    ///
    /// Absent fields keep their current value (itself defaulted), so the
    /// row never gains null holes. A failed read of the current value
    /// fails the save rather than writing defaults over stored numbers.
    pub async fn save(store: &Store, input: &StatisticsInput) -> Result<(), WriteError> {
        let tables = store.writer()?;
        let merged = Self::current(tables)
            .await
            .map_err(|e| write_failed(TABLE, "select", e))?
            .merged(input);

        let mut row = Row::new();
        row.insert("id".into(), Value::from(STATISTICS_ROW_ID));
        row.insert(
            "performed_inspections".into(),
            Value::from(merged.performed_inspections),
        );
        row.insert(
            "years_experience_start".into(),
            Value::from(merged.years_experience_start),
        );
        row.insert(
            "satisfaction_percentage".into(),
            Value::from(merged.satisfaction_percentage),
        );
        row.insert(
            "google_place_id".into(),
            merged.google_place_id.map_or(Value::Null, Value::String),
        );
        row.insert("updated_at".into(), timestamp_now());

        tables
            .upsert(TABLE, row, "id")
            .await
            .map_err(|e| write_failed(TABLE, "upsert", e))
    }

    async fn current(tables: &dyn TableStore) -> Result<Statistics, StoreError> {
        let latest = Query::new().order(Order::desc("updated_at")).limit(1);
        if let Some(stats) = Self::first(tables, &latest).await? {
            return Ok(stats);
        }

        let singleton = Query::new()
            .filter(Filter::eq("id", STATISTICS_ROW_ID))
            .limit(1);
        Ok(Self::first(tables, &singleton).await?.unwrap_or_default())
    }

    async fn first(tables: &dyn TableStore, query: &Query) -> Result<Option<Statistics>, StoreError> {
        let rows = tables.select(TABLE, query).await?;
        Ok(decode_rows::<StatisticsRow>(TABLE, rows)
            .into_iter()
            .next()
            .map(Statistics::from))
    }
}

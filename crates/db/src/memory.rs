//! In-process store for tests and local development without a hosted store.
//!
//! Mirrors the semantics the repositories rely on: equality filters,
//! multi-key ordering with explicit null placement, limits, merge-upserts
//! and generated integer ids.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::store::{Filter, ObjectStorage, Order, Query, Row, StoreError, TableStore};

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Row>>,
    next_id: i64,
    buckets: BTreeSet<String>,
    objects: HashMap<(String, String), StoredObject>,
}

/// An uploaded object held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failure: Option<StoreError>,
    read_failure: Option<StoreError>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with `error`.
    pub fn failing(error: StoreError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// A store whose reads fail with `error` while writes still land.
    pub fn failing_reads(error: StoreError) -> Self {
        Self {
            read_failure: Some(error),
            ..Self::default()
        }
    }

    /// Seed a table with a row, bypassing id generation.
    pub fn seed(&self, table: &str, row: Row) {
        let mut state = self.lock();
        if let Some(id) = row.get("id").and_then(Value::as_i64) {
            state.next_id = state.next_id.max(id);
        }
        state.tables.entry(table.to_string()).or_default().push(row);
    }

    /// Snapshot of a table's rows in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Number of write calls received (including rejected ones).
    pub fn write_count(&self) -> usize {
        self.writes.load(AtomicOrdering::SeqCst)
    }

    pub fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.lock().buckets.contains(bucket)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn begin_write(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        self.check()?;
        Ok(self.lock())
    }
}

impl State {
    fn insert_row(&mut self, table: &str, mut row: Row) {
        match row.get("id").and_then(Value::as_i64) {
            Some(id) => self.next_id = self.next_id.max(id),
            None if row.get("id").is_some_and(|v| !v.is_null()) => {}
            None => {
                self.next_id += 1;
                row.insert("id".into(), Value::from(self.next_id));
            }
        }
        self.tables.entry(table.to_string()).or_default().push(row);
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError> {
        self.check()?;
        if let Some(err) = &self.read_failure {
            return Err(err.clone());
        }
        let state = self.lock();
        let mut rows: Vec<Row> = state
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|order| compare_column(a, b, order))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError> {
        let mut state = self.begin_write()?;
        state.insert_row(table, row);
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        changes: Row,
        filters: &[Filter],
    ) -> Result<(), StoreError> {
        let mut state = self.begin_write()?;
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches_all(row, filters)) {
                row.extend(changes.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let mut state = self.begin_write()?;
        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| !matches_all(row, filters));
        }
        Ok(())
    }

    async fn upsert(&self, table: &str, row: Row, on_conflict: &str) -> Result<(), StoreError> {
        let mut state = self.begin_write()?;
        let key = row.get(on_conflict).cloned().unwrap_or(Value::Null);
        let position = state.tables.get(table).and_then(|rows| {
            rows.iter()
                .position(|stored| same_value(stored.get(on_conflict).unwrap_or(&Value::Null), &key))
        });

        match position {
            Some(index) => {
                if let Some(rows) = state.tables.get_mut(table) {
                    rows[index].extend(row);
                }
            }
            None => state.insert_row(table, row),
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for MemoryStore {
    async fn ensure_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let mut state = self.begin_write()?;
        state.buckets.insert(bucket.to_string());
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.begin_write()?;
        if !state.buckets.contains(bucket) {
            return Err(StoreError::new(format!("Bucket not found: {bucket}")).with_code("404"));
        }
        state.objects.insert(
            (bucket.to_string(), path.to_string()),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}

fn matches_all(row: &Row, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| same_value(row.get(f.column).unwrap_or(&Value::Null), &f.value))
}

/// Scalar text form, so `5` and `"5"` address the same row the way a
/// store coerces filter literals to the column type.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        _ => match (scalar_text(a), scalar_text(b)) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
    }
}

fn compare_column(a: &Row, b: &Row, order: &Order) -> Ordering {
    let a = a.get(order.column).filter(|v| !v.is_null());
    let b = b.get(order.column).filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) if order.nulls_first => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) if order.nulls_first => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = compare_values(a, b);
            if order.ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    if let (Some(a), Some(b)) = (a.as_str(), b.as_str()) {
        let parsed = (
            chrono::DateTime::parse_from_rfc3339(a),
            chrono::DateTime::parse_from_rfc3339(b),
        );
        return match parsed {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => a.cmp(b),
        };
    }
    if let (Some(a), Some(b)) = (a.as_bool(), b.as_bool()) {
        return a.cmp(&b);
    }
    Ordering::Equal
}

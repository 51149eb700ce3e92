//! Client contracts for the hosted table store and object storage.
//!
//! The store speaks rows of storage-native (snake_case) columns. Only the
//! repositories in this crate build rows or read them back; handlers see
//! domain models.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// One table row, keyed by column name.
pub type Row = Map<String, Value>;

/// Error reported by the store for a single call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
    /// Store-specific error code (e.g. a Postgres SQLSTATE), when provided.
    pub code: Option<String>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Why a write did not happen.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WriteError {
    /// The store is unconfigured or only holds a read credential.
    #[error("store write credential is not configured")]
    MissingServiceRole,

    /// The store rejected the write.
    #[error("store rejected the write: {detail}")]
    Db {
        detail: String,
        code: Option<String>,
    },
}

impl WriteError {
    /// Machine-readable reason forwarded to admin callers.
    pub fn reason(&self) -> &'static str {
        match self {
            WriteError::MissingServiceRole => "missing-service-role",
            WriteError::Db { .. } => "db-error",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            WriteError::MissingServiceRole => None,
            WriteError::Db { detail, .. } => Some(detail),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            WriteError::MissingServiceRole => None,
            WriteError::Db { code, .. } => code.as_deref(),
        }
    }
}

impl From<StoreError> for WriteError {
    fn from(err: StoreError) -> Self {
        WriteError::Db {
            detail: err.message,
            code: err.code,
        }
    }
}

/// Equality filter on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Sort key for a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
    pub nulls_first: bool,
}

impl Order {
    /// Ascending with nulls first.
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
            nulls_first: true,
        }
    }

    /// Descending with nulls last.
    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
            nulls_first: false,
        }
    }
}

/// Parameters of a `select`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The hosted table store: select, insert, update, delete and upsert.
///
/// Every call can fail independently; errors come back as values.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError>;

    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError>;

    /// Set `changes` on every row matching all `filters`.
    async fn update(&self, table: &str, changes: Row, filters: &[Filter])
        -> Result<(), StoreError>;

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError>;

    /// Insert `row`, or merge its columns into the row with the same
    /// `on_conflict` value.
    async fn upsert(&self, table: &str, row: Row, on_conflict: &str) -> Result<(), StoreError>;
}

/// Public object storage for uploaded files.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Create `bucket` as a public bucket unless it already exists.
    async fn ensure_bucket(&self, bucket: &str) -> Result<(), StoreError>;

    /// Store `bytes` at `path`, replacing any existing object.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Handle to the configured store, shared by all requests.
///
/// An unconfigured handle is valid: reads degrade to defaults and writes
/// fail with [`WriteError::MissingServiceRole`].
#[derive(Clone, Default)]
pub struct Store {
    tables: Option<Arc<dyn TableStore>>,
    objects: Option<Arc<dyn ObjectStorage>>,
    service_role: bool,
}

impl Store {
    /// A handle with no backing store.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// A handle backed by `tables`. `service_role` states whether the
    /// client holds the elevated credential required for writes.
    pub fn new(tables: Arc<dyn TableStore>, service_role: bool) -> Self {
        Self {
            tables: Some(tables),
            objects: None,
            service_role,
        }
    }

    pub fn with_objects(mut self, objects: Arc<dyn ObjectStorage>) -> Self {
        self.objects = Some(objects);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.tables.is_some()
    }

    pub fn has_service_role(&self) -> bool {
        self.service_role
    }

    pub(crate) fn reader(&self) -> Option<&dyn TableStore> {
        self.tables.as_deref()
    }

    pub(crate) fn writer(&self) -> Result<&dyn TableStore, WriteError> {
        match self.tables.as_deref() {
            Some(tables) if self.service_role => Ok(tables),
            _ => Err(WriteError::MissingServiceRole),
        }
    }

    pub(crate) fn object_writer(&self) -> Result<&dyn ObjectStorage, WriteError> {
        match self.objects.as_deref() {
            Some(objects) if self.service_role && self.tables.is_some() => Ok(objects),
            _ => Err(WriteError::MissingServiceRole),
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("initialized", &self.is_initialized())
            .field("objects", &self.objects.is_some())
            .field("service_role", &self.service_role)
            .finish()
    }
}

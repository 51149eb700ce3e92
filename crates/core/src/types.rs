/// Store-assigned identifiers travel as strings at the API boundary,
/// whatever their column type in the store.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Fixed key of the singleton statistics row.
pub const STATISTICS_ROW_ID: i64 = 1;

/// Current UTC time as stored in `created_at` / `updated_at` columns.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

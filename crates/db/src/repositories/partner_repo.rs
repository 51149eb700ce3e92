//! Repository for the `partners` table.

use serde_json::Value;

use super::{decode_rows, id_filter, id_value, put_nullable, timestamp_now, write_failed};
use crate::models::partner::{Partner, PartnerInput, PartnerList, PartnerRow};
use crate::store::{Filter, Order, Query, Row, Store, WriteError};

const TABLE: &str = "partners";

/// Provides data access for partners.
pub struct PartnerRepo;

impl PartnerRepo {
    /// List partners by `sort_order` (nulls first), then oldest first.
    ///
    /// Degrades to an empty list like [`super::NotificationRepo::list`].
    pub async fn list(store: &Store, active_only: bool) -> PartnerList {
        let Some(tables) = store.reader() else {
            return PartnerList::default();
        };

        let mut query = Query::new()
            .order(Order::asc("sort_order"))
            .order(Order::asc("created_at"));
        if active_only {
            query = query.filter(Filter::eq("active", true));
        }

        match tables.select(TABLE, &query).await {
            Ok(rows) => PartnerList {
                partners: decode_rows::<PartnerRow>(TABLE, rows)
                    .into_iter()
                    .map(Partner::from)
                    .collect(),
            },
            Err(e) => {
                tracing::warn!(table = TABLE, error = %e, "Failed to read partners, serving none");
                PartnerList::default()
            }
        }
    }

    /// Find a partner by id ahead of a write.
    ///
    /// Unlike [`Self::list`] this does not degrade: the stored row feeds
    /// the merge that gets written back, so a failed read must stop the
    /// write instead of resetting stored fields to their defaults.
    pub async fn find_by_id(store: &Store, id: &str) -> Result<Option<Partner>, WriteError> {
        let tables = store.writer()?;
        let query = Query::new().filter(id_filter(id)).limit(1);

        let rows = tables
            .select(TABLE, &query)
            .await
            .map_err(|e| write_failed(TABLE, "select", e))?;
        Ok(decode_rows::<PartnerRow>(TABLE, rows)
            .into_iter()
            .next()
            .map(Partner::from))
    }

    /// Insert a partner, or update-or-insert by id when `input.id` is set.
    ///
    /// `input` is expected to be the effective payload, so fields it lacks
    /// take the column defaults (`sort_order = 0`, `active = true`).
    pub async fn upsert(store: &Store, input: &PartnerInput) -> Result<(), WriteError> {
        let tables = store.writer()?;
        let now = timestamp_now();
        let mut row = columns_row(input);
        row.insert("updated_at".into(), now.clone());

        match &input.id {
            Some(id) => {
                row.insert("id".into(), id_value(id));
                tables
                    .upsert(TABLE, row, "id")
                    .await
                    .map_err(|e| write_failed(TABLE, "upsert", e))
            }
            None => {
                row.insert("created_at".into(), now);
                tables
                    .insert(TABLE, row)
                    .await
                    .map_err(|e| write_failed(TABLE, "insert", e))
            }
        }
    }

    /// Delete a partner. Deleting a missing id is not an error.
    pub async fn delete(store: &Store, id: &str) -> Result<(), WriteError> {
        let tables = store.writer()?;
        tables
            .delete(TABLE, &[id_filter(id)])
            .await
            .map_err(|e| write_failed(TABLE, "delete", e))
    }
}

fn columns_row(input: &PartnerInput) -> Row {
    let mut row = Row::new();
    if let Some(name) = &input.name {
        row.insert("name".into(), Value::String(name.clone()));
    }
    put_nullable(&mut row, "logo_url", &input.logo_url);
    put_nullable(&mut row, "link", &input.link);
    row.insert("sort_order".into(), Value::from(input.sort_order.unwrap_or(0)));
    row.insert("active".into(), Value::Bool(input.active.unwrap_or(true)));
    row
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::StoreError;

    fn input(value: Value) -> PartnerInput {
        serde_json::from_value(value).unwrap()
    }

    fn seed(memory: &MemoryStore, value: Value) {
        memory.seed(TABLE, value.as_object().cloned().unwrap());
    }

    #[tokio::test]
    async fn unconfigured_store_lists_nothing() {
        assert!(PartnerRepo::list(&Store::unconfigured(), true).await.partners.is_empty());
    }

    #[tokio::test]
    async fn list_orders_by_sort_order_then_creation() {
        let memory = Arc::new(MemoryStore::new());
        seed(&memory, json!({"id": 1, "name": "C", "sort_order": 2, "active": true, "created_at": "2024-01-01T00:00:00Z"}));
        seed(&memory, json!({"id": 2, "name": "B", "sort_order": 1, "active": true, "created_at": "2024-02-01T00:00:00Z"}));
        seed(&memory, json!({"id": 3, "name": "A", "sort_order": 1, "active": true, "created_at": "2024-01-15T00:00:00Z"}));
        seed(&memory, json!({"id": 4, "name": "N", "sort_order": null, "active": true, "created_at": "2024-03-01T00:00:00Z"}));
        seed(&memory, json!({"id": 5, "name": "Off", "sort_order": 0, "active": false}));

        let store = Store::new(memory, false);
        let names: Vec<_> = PartnerRepo::list(&store, true)
            .await
            .partners
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["N", "A", "B", "C"]);
    }

    #[tokio::test]
    async fn insert_applies_defaults() {
        let memory = Arc::new(MemoryStore::new());
        PartnerRepo::upsert(&Store::new(memory.clone(), true), &input(json!({"name": "New"})))
            .await
            .unwrap();

        let rows = memory.rows(TABLE);
        assert_eq!(rows[0]["sort_order"], 0);
        assert_eq!(rows[0]["active"], true);
        assert!(rows[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn upsert_with_id_updates_or_inserts() {
        let memory = Arc::new(MemoryStore::new());
        seed(&memory, json!({"id": 1, "name": "Old", "logo_url": "https://x/logo.png"}));
        let store = Store::new(memory.clone(), true);

        PartnerRepo::upsert(&store, &input(json!({"id": "1", "name": "Renamed"})))
            .await
            .unwrap();
        PartnerRepo::upsert(&store, &input(json!({"id": 9, "name": "Fresh"})))
            .await
            .unwrap();

        let rows = memory.rows(TABLE);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Renamed");
        assert_eq!(rows[0]["logo_url"], "https://x/logo.png");
        assert_eq!(rows[1]["id"], 9);
    }

    #[tokio::test]
    async fn find_by_id_reads_one_partner() {
        let memory = Arc::new(MemoryStore::new());
        seed(&memory, json!({"id": 7, "name": "Seven"}));
        let store = Store::new(memory, true);

        let partner = PartnerRepo::find_by_id(&store, "7").await.unwrap().unwrap();
        assert_eq!(partner.id, "7");
        assert_eq!(partner.name, "Seven");
        assert_eq!(PartnerRepo::find_by_id(&store, "8").await, Ok(None));
    }

    #[tokio::test]
    async fn failing_read_empties_the_list() {
        let store = Store::new(Arc::new(MemoryStore::failing(StoreError::new("down"))), true);
        assert!(PartnerRepo::list(&store, false).await.partners.is_empty());
    }

    #[tokio::test]
    async fn lookup_before_write_reports_read_failures() {
        let store = Store::new(
            Arc::new(MemoryStore::failing_reads(
                StoreError::new("read timeout").with_code("57014"),
            )),
            true,
        );

        assert_matches!(
            PartnerRepo::find_by_id(&store, "4").await,
            Err(WriteError::Db { detail, code }) if detail == "read timeout" && code.as_deref() == Some("57014")
        );
    }

    #[tokio::test]
    async fn lookup_before_write_needs_the_service_role() {
        assert_eq!(
            PartnerRepo::find_by_id(&Store::unconfigured(), "1").await,
            Err(WriteError::MissingServiceRole)
        );
    }
}

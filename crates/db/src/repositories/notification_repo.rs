//! Repository for the `notifications` table.

use serde_json::Value;

use super::{decode_rows, id_filter, put_nullable, timestamp_now, write_failed};
use crate::models::notification::{Notification, NotificationInput, NotificationList, NotificationRow};
use crate::store::{Filter, Order, Query, Row, Store, WriteError};

const TABLE: &str = "notifications";

/// Provides data access for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// List notifications, newest first.
    ///
    /// Returns an empty list when the store is unconfigured or the read
    /// fails, so the public page renders without announcements.
    pub async fn list(store: &Store, active_only: bool) -> NotificationList {
        let Some(tables) = store.reader() else {
            return NotificationList::default();
        };

        let mut query = Query::new().order(Order::desc("created_at"));
        if active_only {
            query = query.filter(Filter::eq("active", true));
        }

        match tables.select(TABLE, &query).await {
            Ok(rows) => NotificationList {
                notifications: decode_rows::<NotificationRow>(TABLE, rows)
                    .into_iter()
                    .map(Notification::from)
                    .collect(),
            },
            Err(e) => {
                tracing::warn!(table = TABLE, error = %e, "Failed to read notifications, serving none");
                NotificationList::default()
            }
        }
    }

    /// Insert a new notification, or update the supplied fields of an
    /// existing one when `input.id` is set.
    ///
    /// New notifications are active unless `active` says otherwise.
    pub async fn upsert(store: &Store, input: &NotificationInput) -> Result<(), WriteError> {
        if let Some(id) = &input.id {
            return Self::update(store, id, input).await;
        }

        let tables = store.writer()?;
        let now = timestamp_now();
        let mut row = changes_row(input);
        row.entry("active").or_insert(Value::Bool(true));
        row.insert("created_at".into(), now.clone());
        row.insert("updated_at".into(), now);

        tables
            .insert(TABLE, row)
            .await
            .map_err(|e| write_failed(TABLE, "insert", e))
    }

    /// Update only the fields present in `changes`.
    pub async fn update(
        store: &Store,
        id: &str,
        changes: &NotificationInput,
    ) -> Result<(), WriteError> {
        let tables = store.writer()?;
        let mut row = changes_row(changes);
        row.insert("updated_at".into(), timestamp_now());

        tables
            .update(TABLE, row, &[id_filter(id)])
            .await
            .map_err(|e| write_failed(TABLE, "update", e))
    }

    /// Delete a notification. Deleting a missing id is not an error.
    pub async fn delete(store: &Store, id: &str) -> Result<(), WriteError> {
        let tables = store.writer()?;
        tables
            .delete(TABLE, &[id_filter(id)])
            .await
            .map_err(|e| write_failed(TABLE, "delete", e))
    }
}

/// Storage columns for the fields present in `input`.
fn changes_row(input: &NotificationInput) -> Row {
    let mut row = Row::new();
    if let Some(text) = &input.text {
        row.insert("text".into(), Value::String(text.clone()));
    }
    put_nullable(&mut row, "background_color", &input.background_color);
    put_nullable(&mut row, "background_gradient", &input.background_gradient);
    put_nullable(&mut row, "border_color", &input.border_color);
    put_nullable(&mut row, "text_color", &input.text_color);
    if let Some(active) = input.active {
        row.insert("active".into(), Value::Bool(active));
    }
    row
}

//! Site-wide announcement banners.

use kontrola_core::fields;
use kontrola_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `notifications` table.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRow {
    #[serde(deserialize_with = "fields::id")]
    pub id: EntityId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub background_gradient: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: EntityId,
    /// May contain HTML.
    pub text: String,
    pub background_color: Option<String>,
    pub background_gradient: Option<String>,
    pub border_color: Option<String>,
    pub text_color: Option<String>,
    pub active: bool,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            text: row.text.unwrap_or_default(),
            background_color: row.background_color,
            background_gradient: row.background_gradient,
            border_color: row.border_color,
            text_color: row.text_color,
            active: row.active.unwrap_or(true),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `GET /api/notifications` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
}

/// DTO for creating (no `id`) or partially updating a notification.
///
/// Absent fields are left untouched; colors set to `null` are cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    #[serde(default, deserialize_with = "fields::optional_id")]
    pub id: Option<EntityId>,
    pub text: Option<String>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub background_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub background_gradient: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub border_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub text_color: Option<Option<String>>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn row_maps_to_camel_case_model() {
        let row: NotificationRow = serde_json::from_value(json!({
            "id": 3,
            "text": "<b>Closed</b> on Monday",
            "background_color": "#fff",
            "background_gradient": null,
            "border_color": "#000",
            "text_color": "#111",
            "active": false,
            "created_at": "2025-03-01T08:00:00+00:00",
            "updated_at": null
        }))
        .unwrap();

        let json = serde_json::to_value(Notification::from(row)).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["backgroundColor"], "#fff");
        assert_eq!(json["backgroundGradient"], serde_json::Value::Null);
        assert_eq!(json["active"], false);
        assert!(json["createdAt"].as_str().unwrap().starts_with("2025-03-01T08:00:00"));
    }

    #[test]
    fn missing_active_reads_as_active() {
        let row: NotificationRow = serde_json::from_value(json!({"id": "a", "text": "x"})).unwrap();
        assert!(Notification::from(row).active);
    }

    #[test]
    fn input_distinguishes_cleared_colors() {
        let input: NotificationInput = serde_json::from_value(json!({
            "text": "x",
            "borderColor": null
        }))
        .unwrap();
        assert_eq!(input.border_color, Some(None));
        assert_eq!(input.text_color, None);
        assert_eq!(input.id, None);
    }
}

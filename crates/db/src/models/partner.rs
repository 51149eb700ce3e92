//! Partner logos shown on the marketing page.

use kontrola_core::fields;
use kontrola_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A row from the `partners` table.
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerRow {
    #[serde(deserialize_with = "fields::id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: EntityId,
    pub name: String,
    pub logo_url: Option<String>,
    pub link: Option<String>,
    pub sort_order: i64,
    pub active: bool,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl From<PartnerRow> for Partner {
    fn from(row: PartnerRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            logo_url: row.logo_url,
            link: row.link,
            sort_order: row.sort_order.unwrap_or(0),
            active: row.active.unwrap_or(true),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `GET /api/partners` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartnerList {
    pub partners: Vec<Partner>,
}

/// DTO for creating or updating a partner. Built from the effective
/// payload (see [`effective_partner`]), so absent fields mean "not stored
/// yet" rather than "keep".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInput {
    #[serde(default, deserialize_with = "fields::optional_id")]
    pub id: Option<EntityId>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub logo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::nullable")]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::optional_integer")]
    pub sort_order: Option<i64>,
    pub active: Option<bool>,
}

/// Stored fields carried into the effective payload when the request
/// omits them.
const MERGED_FIELDS: &[&str] = &["name", "logoUrl", "link", "sortOrder", "active"];

/// Overlay an incoming payload on the stored partner.
///
/// Used for every partner write, with `existing = None` for inserts, so
/// validation and storage both see the value that will actually be
/// persisted. An omitted `logoUrl` keeps the stored logo; an explicit
/// `null` clears it.
pub fn effective_partner(existing: Option<&Partner>, incoming: &Map<String, Value>) -> Value {
    let mut merged = Map::new();

    if let Some(Value::Object(stored)) = existing.and_then(|p| serde_json::to_value(p).ok()) {
        for field in MERGED_FIELDS {
            if let Some(value) = stored.get(*field) {
                merged.insert((*field).to_string(), value.clone());
            }
        }
    }

    for (key, value) in incoming {
        merged.insert(key.clone(), value.clone());
    }
    Value::Object(merged)
}

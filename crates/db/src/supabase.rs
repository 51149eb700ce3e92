//! Hosted store client: PostgREST tables and the storage object API.
//!
//! Both live behind one base URL and authenticate with the same key, sent
//! as `apikey` and as a bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Filter, ObjectStorage, Order, Query, Row, Store, StoreError, TableStore};

/// Hosted store settings, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub service_role_key: Option<String>,
    pub anon_key: Option<String>,
}

/// Which store settings are present, without revealing their values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvSummary {
    pub url: &'static str,
    pub service_role_key: &'static str,
    pub anon_key: &'static str,
}

fn set_or_missing(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "missing"
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SupabaseConfig {
    /// | Env Var                     | Meaning                 |
    /// |-----------------------------|-------------------------|
    /// | `SUPABASE_URL`              | project base URL        |
    /// | `SUPABASE_SERVICE_ROLE_KEY` | write-capable key       |
    /// | `SUPABASE_ANON_KEY`         | read-only key           |
    pub fn from_env() -> Self {
        Self {
            url: non_empty_env("SUPABASE_URL"),
            service_role_key: non_empty_env("SUPABASE_SERVICE_ROLE_KEY"),
            anon_key: non_empty_env("SUPABASE_ANON_KEY"),
        }
    }

    pub fn env_summary(&self) -> EnvSummary {
        EnvSummary {
            url: set_or_missing(&self.url),
            service_role_key: set_or_missing(&self.service_role_key),
            anon_key: set_or_missing(&self.anon_key),
        }
    }

    /// Build the store handle. The service-role key is preferred when both
    /// keys are present; without a URL or any key the handle is
    /// unconfigured.
    pub fn connect(&self) -> Store {
        let key = self.service_role_key.as_ref().or(self.anon_key.as_ref());
        let (Some(url), Some(key)) = (self.url.as_ref(), key) else {
            return Store::unconfigured();
        };

        let client = Arc::new(SupabaseClient::new(url.clone(), key.clone()));
        Store::new(client.clone(), self.service_role_key.is_some()).with_objects(client)
    }
}

/// Error body returned by PostgREST and the storage API.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default, rename = "statusCode")]
    status_code: Option<Value>,
}

/// REST client for one hosted project.
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl SupabaseClient {
    pub fn new(base_url: String, key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, key)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: String, key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{path}", self.base_url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("apikey", &self.key).bearer_auth(&self.key)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = self
            .authed(request)
            .send()
            .await
            .map_err(|e| StoreError::new(format!("HTTP request failed: {e}")))?;
        Self::ensure_success(response).await
    }

    /// Turn a non-2xx response into a [`StoreError`] carrying the store's
    /// own message and code.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();

        let message = body.message.or(body.error).unwrap_or(text);
        let code = body
            .code
            .or(body.status_code)
            .map(|c| match c {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| status.as_u16().to_string());

        Err(StoreError::new(message).with_code(code))
    }
}

/// PostgREST literal for an equality filter value.
fn filter_param(filter: &Filter) -> (String, String) {
    let value = match &filter.value {
        Value::Null => return (filter.column.to_string(), "is.null".to_string()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    (filter.column.to_string(), format!("eq.{value}"))
}

fn order_param(order: &[Order]) -> Option<(String, String)> {
    if order.is_empty() {
        return None;
    }
    let keys: Vec<String> = order
        .iter()
        .map(|o| {
            format!(
                "{}.{}.{}",
                o.column,
                if o.ascending { "asc" } else { "desc" },
                if o.nulls_first { "nullsfirst" } else { "nullslast" }
            )
        })
        .collect();
    Some(("order".to_string(), keys.join(",")))
}

fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(query.filters.iter().map(filter_param));
    params.extend(order_param(&query.order));
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

#[async_trait]
impl TableStore for SupabaseClient {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError> {
        let response = self
            .send(self.client.get(self.table_url(table)).query(&query_params(query)))
            .await?;
        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| StoreError::new(format!("Invalid response body: {e}")))
    }

    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError> {
        self.send(
            self.client
                .post(self.table_url(table))
                .header("Prefer", "return=minimal")
                .json(&row),
        )
        .await?;
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        changes: Row,
        filters: &[Filter],
    ) -> Result<(), StoreError> {
        let params: Vec<_> = filters.iter().map(filter_param).collect();
        self.send(
            self.client
                .patch(self.table_url(table))
                .query(&params)
                .header("Prefer", "return=minimal")
                .json(&changes),
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let params: Vec<_> = filters.iter().map(filter_param).collect();
        self.send(
            self.client
                .delete(self.table_url(table))
                .query(&params)
                .header("Prefer", "return=minimal"),
        )
        .await?;
        Ok(())
    }

    async fn upsert(&self, table: &str, row: Row, on_conflict: &str) -> Result<(), StoreError> {
        self.send(
            self.client
                .post(self.table_url(table))
                .query(&[("on_conflict", on_conflict)])
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&row),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn ensure_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let existing = self
            .send(self.client.get(self.storage_url(&format!("bucket/{bucket}"))))
            .await;
        if existing.is_ok() {
            return Ok(());
        }

        let body = serde_json::json!({ "id": bucket, "name": bucket, "public": true });
        self.send(self.client.post(self.storage_url("bucket")).json(&body))
            .await?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.send(
            self.client
                .post(self.storage_url(&format!("object/{bucket}/{path}")))
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .header("x-upsert", "true")
                .body(bytes),
        )
        .await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.storage_url(&format!("object/public/{bucket}/{path}"))
    }
}

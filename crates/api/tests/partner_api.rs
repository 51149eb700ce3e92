//! HTTP-level tests for `/api/partners`.

mod common;

use axum::http::{Method, StatusCode};
use common::{admin_empty, admin_get, admin_json, body_json, get, json_request};
use serde_json::{json, Value};

fn seed(memory: &kontrola_db::memory::MemoryStore, row: Value) {
    memory.seed("partners", row.as_object().cloned().unwrap());
}

#[tokio::test]
async fn list_without_store_is_empty() {
    let app = common::unconfigured_app();
    let response = get(&app, "/api/partners").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"partners": []}));
}

#[tokio::test]
async fn create_answers_200_and_applies_defaults() {
    let (app, _memory) = common::memory_app();
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners",
        json!({"name": "Autoservis Novak", "link": "https://novak.example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let json = body_json(get(&app, "/api/partners").await).await;
    let partner = &json["partners"][0];
    assert_eq!(partner["name"], "Autoservis Novak");
    assert_eq!(partner["sortOrder"], 0);
    assert_eq!(partner["active"], true);
    assert_eq!(partner["logoUrl"], Value::Null);
}

#[tokio::test]
async fn link_must_be_an_http_url() {
    let (app, memory) = common::memory_app();

    for link in ["not a url", "ftp://x"] {
        let response = admin_json(
            &app,
            Method::POST,
            "/api/partners",
            json!({"name": "P", "link": link}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{link}");
        let json = body_json(response).await;
        assert_eq!(json["errors"], json!(["Link must be a valid URL"]));
    }
    assert_eq!(memory.write_count(), 0);

    let ok = admin_json(
        &app,
        Method::POST,
        "/api/partners",
        json!({"name": "P", "link": "https://example.com"}),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_requires_a_name() {
    let (app, _memory) = common::memory_app();
    let response = admin_json(&app, Method::POST, "/api/partners", json!({"sortOrder": 1.5})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"],
        json!([
            "Name is required and must be a non-empty string",
            "Sort order must be an integer"
        ])
    );
}

#[tokio::test]
async fn update_preserves_stored_logo_and_name() {
    let (app, memory) = common::memory_app();
    seed(
        &memory,
        json!({
            "id": 4,
            "name": "Novak",
            "logo_url": "https://cdn.example.com/novak.png",
            "sort_order": 2,
            "active": true
        }),
    );

    // No name and no logo in the payload: both come from the stored row.
    let response = admin_json(&app, Method::PUT, "/api/partners/4", json!({"sortOrder": 5})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = memory.rows("partners");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Novak");
    assert_eq!(rows[0]["logo_url"], "https://cdn.example.com/novak.png");
    assert_eq!(rows[0]["sort_order"], 5);
}

#[tokio::test]
async fn explicit_null_logo_clears_it() {
    let (app, memory) = common::memory_app();
    seed(
        &memory,
        json!({"id": 4, "name": "Novak", "logo_url": "https://cdn.example.com/novak.png"}),
    );

    admin_json(&app, Method::PUT, "/api/partners?id=4", json!({"logoUrl": null})).await;
    assert_eq!(memory.rows("partners")[0]["logo_url"], Value::Null);
}

#[tokio::test]
async fn update_of_unknown_partner_needs_a_name() {
    let (app, memory) = common::memory_app();
    let response = admin_json(&app, Method::PUT, "/api/partners/99", json!({"active": false})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(memory.rows("partners").is_empty());
}

#[tokio::test]
async fn list_order_and_visibility() {
    let (app, memory) = common::memory_app();
    seed(&memory, json!({"id": 1, "name": "B", "sort_order": 1, "active": true, "created_at": "2024-01-02T00:00:00Z"}));
    seed(&memory, json!({"id": 2, "name": "A", "sort_order": 1, "active": true, "created_at": "2024-01-01T00:00:00Z"}));
    seed(&memory, json!({"id": 3, "name": "First", "sort_order": 0, "active": true}));
    seed(&memory, json!({"id": 4, "name": "Hidden", "sort_order": 0, "active": false}));

    let public = body_json(get(&app, "/api/partners").await).await;
    let names: Vec<_> = public["partners"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["First", "A", "B"]);

    let admin = body_json(admin_get(&app, "/api/partners").await).await;
    assert_eq!(admin["partners"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn delete_by_path_and_query() {
    let (app, memory) = common::memory_app();
    seed(&memory, json!({"id": 1, "name": "One"}));
    seed(&memory, json!({"id": 2, "name": "Two"}));

    assert_eq!(
        admin_empty(&app, Method::DELETE, "/api/partners/1").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        admin_empty(&app, Method::DELETE, "/api/partners?id=2").await.status(),
        StatusCode::OK
    );
    assert!(memory.rows("partners").is_empty());
}

#[tokio::test]
async fn mutations_without_credentials_are_rejected() {
    let (app, memory) = common::memory_app();
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let response = json_request(&app, method, "/api/partners/1", json!({"name": "x"})).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    assert_eq!(memory.write_count(), 0);
}

#[tokio::test]
async fn store_failure_on_save_is_reported() {
    let app = common::failing_app();
    let response = admin_json(&app, Method::POST, "/api/partners", json!({"name": "P"})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to save partner");
    assert_eq!(json["reason"], "db-error");
    assert_eq!(json["detail"], "connection refused");
}

#[tokio::test]
async fn unsupported_method_returns_405() {
    let app = common::unconfigured_app();
    let response = json_request(&app, Method::PATCH, "/api/partners/3", json!({})).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["allow"], "GET, POST, PUT, DELETE, OPTIONS");
}

#[tokio::test]
async fn update_stops_when_stored_partner_cannot_be_read() {
    let (app, memory) = common::failing_reads_app();
    seed(
        &memory,
        json!({"id": 4, "name": "Novak", "sort_order": 7, "active": false}),
    );

    let response = admin_json(&app, Method::PUT, "/api/partners/4", json!({"name": "Novak 2"})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Failed to update partner",
            "reason": "db-error",
            "detail": "canceling statement due to statement timeout",
            "code": "57014"
        })
    );

    assert_eq!(memory.write_count(), 0);
    let row = &memory.rows("partners")[0];
    assert_eq!(row["name"], "Novak");
    assert_eq!(row["sort_order"], 7);
    assert_eq!(row["active"], false);
}

#[tokio::test]
async fn post_with_id_stops_when_stored_partner_cannot_be_read() {
    let (app, memory) = common::failing_reads_app();
    seed(&memory, json!({"id": 4, "name": "Novak", "sort_order": 7}));

    // Without the stored row the merged payload would lack a name; the read
    // failure must win over that validation error.
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners",
        json!({"id": 4, "active": false}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to save partner");
    assert_eq!(json["reason"], "db-error");
    assert_eq!(memory.write_count(), 0);
}

#[tokio::test]
async fn whole_valued_sort_order_is_stored_as_integer() {
    let (app, memory) = common::memory_app();
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners",
        json!({"name": "P", "sortOrder": 2.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(memory.rows("partners")[0]["sort_order"], 2);
}

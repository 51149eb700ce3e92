//! HTTP-level tests for `/api/partners/upload`.

mod common;

use axum::http::{Method, StatusCode};
use common::{admin_json, body_json, json_request};
use kontrola_core::upload::{LOGO_BUCKET, MAX_UPLOAD_BODY_BYTES};
use serde_json::json;

/// "hello" in base64.
const HELLO_B64: &str = "aGVsbG8=";

#[tokio::test]
async fn upload_requires_admin() {
    let (app, memory) = common::memory_app();
    let response = json_request(
        &app,
        Method::POST,
        "/api/partners/upload",
        json!({"fileName": "logo.png", "dataBase64": HELLO_B64}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(memory.write_count(), 0);
}

#[tokio::test]
async fn upload_without_service_role_is_refused() {
    let (app, memory) = common::read_only_app();
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners/upload",
        json!({"fileName": "logo.png", "dataBase64": HELLO_B64}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing Supabase service role", "reason": "missing-service-role"})
    );
    assert_eq!(memory.write_count(), 0);
}

#[tokio::test]
async fn upload_without_store_is_refused() {
    let app = common::unconfigured_app();
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners/upload",
        json!({"fileName": "logo.png", "dataBase64": HELLO_B64}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn upload_requires_name_and_data() {
    let (app, _memory) = common::memory_app();

    for body in [
        json!({"fileName": "logo.png"}),
        json!({"dataBase64": HELLO_B64}),
        json!({"fileName": "", "dataBase64": HELLO_B64}),
    ] {
        let response = admin_json(&app, Method::POST, "/api/partners/upload", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "fileName and dataBase64 are required"})
        );
    }
}

#[tokio::test]
async fn body_over_the_upload_limit_is_rejected() {
    let (app, memory) = common::memory_app();
    let data = "A".repeat(MAX_UPLOAD_BODY_BYTES);
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners/upload",
        json!({"fileName": "big.png", "dataBase64": data}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(memory.write_count(), 0);
}

#[tokio::test]
async fn invalid_base64_is_rejected() {
    let (app, _memory) = common::memory_app();
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners/upload",
        json!({"fileName": "logo.png", "dataBase64": "%%%"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "dataBase64 is not valid base64"})
    );
}

#[tokio::test]
async fn upload_stores_object_and_returns_url() {
    let (app, memory) = common::memory_app();
    let response = admin_json(
        &app,
        Method::POST,
        "/api/partners/upload",
        json!({
            "fileName": "Novak logo.png",
            "fileType": "image/png",
            "dataBase64": format!("data:image/png;base64,{HELLO_B64}")
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let url = json["url"].as_str().unwrap();
    let path = url.strip_prefix("memory://partners/").unwrap();
    assert!(path.ends_with("_Novak_logo.png"));

    let object = memory.object(LOGO_BUCKET, path).unwrap();
    assert_eq!(object.bytes, b"hello");
    assert_eq!(object.content_type, "image/png");
}

#[tokio::test]
async fn get_is_not_allowed() {
    let app = common::unconfigured_app();
    let response = common::get(&app, "/api/partners/upload").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["allow"], "POST, OPTIONS");
}

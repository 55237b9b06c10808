//! End-to-end tests against the assembled router, driving real HTTP
//! requests through an in-memory database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use shopgate_api::config::ApiConfig;
use shopgate_api::{router, AppState};
use shopgate_db::{Database, DbConfig};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let config = ApiConfig::for_tests();
    router(Arc::new(AppState::new(db, &config)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn widget(name: &str, stock: i64) -> Value {
    json!({
        "name": name,
        "description": "a widget",
        "price": 9.99,
        "stock_quantity": stock,
        "category": "tools",
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = app().await;

    let (status, created) = send(&app, "POST", "/products", Some(widget("Widget", 7))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Widget");
    assert_eq!(fetched["stock_quantity"], 7);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({
            "name": "Gadget",
            "description": "",
            "price": 1.5,
            "category": "gifts",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Gadget");
    assert_eq!(updated["stock_quantity"], 7); // update never touches stock
}

#[tokio::test]
async fn test_product_error_statuses() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let (status, body) = send(
        &app,
        "GET",
        "/products/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_stock_adjustment_conflict_leaves_stock_unchanged() {
    let app = app().await;

    let (_, created) = send(&app, "POST", "/products", Some(widget("Widget", 3))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{id}/stock"),
        Some(json!({ "quantity_change": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "insufficient_stock");

    let (_, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;
    assert_eq!(fetched["stock_quantity"], 3);

    let (status, adjusted) = send(
        &app,
        "PUT",
        &format!("/products/{id}/stock"),
        Some(json!({ "quantity_change": -3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(adjusted["stock_quantity"], 0);
}

#[tokio::test]
async fn test_order_total_is_derived_server_side() {
    let app = app().await;

    // A client-supplied total is ignored: unknown fields are dropped
    let (status, order) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "user_id": "user-1",
            "total_amount": 999.0,
            "items": [
                { "product_id": "p1", "quantity": 2, "price": 10.0 },
                { "product_id": "p2", "quantity": 1, "price": 5.0 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["total_amount"], 25.0);
    assert_eq!(order["status"], "pending");

    let id = order["id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/orders/{id}"),
        Some(json!({ "status": "shipped" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "shipped");
    assert_eq!(updated["total_amount"], 25.0);
}

#[tokio::test]
async fn test_order_with_no_items_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "user_id": "user-1", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_list_pagination_defaults_and_bounds() {
    let app = app().await;

    for i in 0..3 {
        send(&app, "POST", "/products", Some(widget(&format!("w-{i}"), 1))).await;
    }

    // Out-of-range page and limit fall back to 1 and 10
    let (status, body) = send(&app, "GET", "/products?page=0&limit=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let (_, page_one) = send(&app, "GET", "/products?page=1&limit=2", None).await;
    assert_eq!(page_one["items"].as_array().unwrap().len(), 2);
    let (_, page_two) = send(&app, "GET", "/products?page=2&limit=2", None).await;
    assert_eq!(page_two["items"].as_array().unwrap().len(), 1);
    assert_eq!(page_two["total"], 3);
}

#[tokio::test]
async fn test_user_registration_and_authentication() {
    let app = app().await;

    let (status, user) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "email": "ada@example.com",
            "password": "hunter2",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "customer",
            "phone": "",
            "address": "",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // The hash must never appear on the wire
    assert!(user.get("password_hash").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "email": "ada@example.com",
            "password": "other",
            "first_name": "",
            "last_name": "",
            "role": "",
            "phone": "",
            "address": "",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let (status, auth) = send(
        &app,
        "POST",
        "/auth",
        Some(json!({ "email": "ada@example.com", "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(auth["token"].as_str().unwrap().len() > 20);
    assert_eq!(auth["user"]["email"], "ada@example.com");

    let (status, body) = send(
        &app,
        "POST",
        "/auth",
        Some(json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn test_user_delete_round_trip() {
    let app = app().await;

    let (_, user) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "email": "ada@example.com",
            "password": "hunter2",
            "first_name": "",
            "last_name": "",
            "role": "",
            "phone": "",
            "address": "",
        })),
    )
    .await;
    let id = user["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

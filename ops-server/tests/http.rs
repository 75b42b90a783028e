mod common;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use ops_server::api::build_app;
use serde_json::{Value, json};
use shared::ErrorCode;
use tower::ServiceExt;

async fn app() -> Router {
    build_app(common::test_state().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
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

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = send(&app, Method::GET, "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["versions"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let app = app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_roles() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/roles", None).await;
    assert_eq!(status, StatusCode::OK);
    let roles = body.as_array().unwrap();
    assert_eq!(roles.len(), 3);
    assert_eq!(roles[1]["role"], "waiter");
    assert_eq!(roles[1]["home"], "/waiter");

    let (status, body) = send(&app, Method::GET, "/api/roles/Chef", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["home"], "/chef");
    assert_eq!(body["screens"][1]["path"], "/chef/inventory");

    let (status, _) = send(&app, Method::GET, "/api/roles/manager", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_menu_item_crud() {
    let app = app().await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/menu-items",
        Some(json!({
            "name": "Margherita Pizza",
            "price": 12.99,
            "category": "Pizza",
            "allergens": ["gluten", "dairy"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["price"], 12.99);
    assert_eq!(created["available"], true);
    assert_eq!(created["allergens"], json!(["dairy", "gluten"]));
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/menu-items/{id}"),
        Some(json!({ "available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["available"], false);

    let (status, list) = send(&app, Method::GET, "/api/menu-items?category=Pizza", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/menu-items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::DELETE, &format!("/api/menu-items/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_menu_item_validation_and_bad_query() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/menu-items",
        Some(json!({ "name": "Free Lunch", "price": -1.0, "category": "Mains" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/menu-items?order_by=secret", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "order_by");
}

#[tokio::test]
async fn test_inventory_status_ignores_client_value() {
    let app = app().await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({
            "ingredient": "Tomatoes",
            "current_stock": 2.0,
            "min_stock": 10.0,
            "unit": "kg",
            "status": "good"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "critical");

    send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "ingredient": "Flour", "current_stock": 25.0, "min_stock": 15.0 })),
    )
    .await;

    let (_, summary) = send(&app, Method::GET, "/api/inventory/summary", None).await;
    assert_eq!(summary["critical"], 1);
    assert_eq!(summary["good"], 1);

    let (_, alerts) = send(&app, Method::GET, "/api/inventory/alerts", None).await;
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["ingredient"], "Tomatoes");

    let id = created["id"].as_i64().unwrap();
    let (_, restocked) = send(
        &app,
        Method::PUT,
        &format!("/api/inventory/{id}"),
        Some(json!({ "current_stock": 30.0 })),
    )
    .await;
    assert_eq!(restocked["status"], "good");
}

#[tokio::test]
async fn test_order_flow_over_http() {
    let app = app().await;
    let (status, order) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "table_number": 5,
            "items": [
                { "name": "Margherita Pizza", "quantity": 2, "price": 12.99 },
                { "name": "Caesar Salad", "quantity": 1, "price": 8.99 }
            ],
            "allergies": ["nuts"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotal"], 34.97);
    assert_eq!(order["tax"], 3.5);
    assert_eq!(order["total"], 38.47);
    let id = order["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{id}/advance"),
        Some(json!({ "status": "ready" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/kitchen/orders/{id}/action"),
        Some(json!({ "action": "start_preparing" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, queue) = send(&app, Method::GET, "/api/kitchen/orders", None).await;
    let queue = queue.as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["status"], "preparing");
    assert_eq!(queue[0]["action"], "mark_ready");
    assert_eq!(queue[0]["action_label"], "Mark as Ready");

    let (_, filtered) = send(&app, Method::GET, "/api/orders?status=preparing", None).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    let (_, filtered) = send(&app, Method::GET, "/api/orders?status_ne=preparing", None).await;
    assert!(filtered.as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_validation_over_http() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "table_number": null,
            "items": [{ "name": "Soup", "quantity": 1, "price": 4.5 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].as_u64().unwrap() > 0);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": 2, "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/api/orders", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_quote() {
    let app = app().await;
    let (status, quote) = send(
        &app,
        Method::POST,
        "/api/orders/quote",
        Some(json!([{ "name": "Pasta", "quantity": 3, "price": 10.0 }])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["subtotal"], 30.0);
    assert_eq!(quote["tax"], 3.0);
    assert_eq!(quote["total"], 33.0);
}

#[tokio::test]
async fn test_quote_rejects_negative_and_huge_prices() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders/quote",
        Some(json!([{ "name": "Refund", "quantity": 3, "price": -10.0 }])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], ErrorCode::MenuItemInvalidPrice.code());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders/quote",
        Some(json!([{ "name": "Caviar", "quantity": 2, "price": 1.0e27 }])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_staff_and_summary() {
    let app = app().await;
    for (name, status) in [("Ana", "present"), ("Marco", "leave"), ("Zoe", "present")] {
        let (code, _) = send(
            &app,
            Method::POST,
            "/api/staff",
            Some(json!({ "name": name, "role": "Waiter", "shift": "Evening", "status": status })),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
    }

    let (_, summary) = send(&app, Method::GET, "/api/staff/summary", None).await;
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["present"], 2);
    assert_eq!(summary["leave"], 1);
    assert_eq!(summary["absent"], 0);

    let (_, list) = send(&app, Method::GET, "/api/staff?order_by=name&ascending=false", None).await;
    assert_eq!(list[0]["name"], "Zoe");

    let (_, versions) = send(&app, Method::GET, "/api/changes/versions", None).await;
    assert_eq!(versions["staff"], 3);
    assert_eq!(versions["orders"], 0);
}

//! HTTP-level tests for the panel API.

#![allow(clippy::unwrap_used)] // test code

use axum_test::TestServer;
use lunamart_store::MemoryCollections;
use lunamart_testing::mocks::{FakeAuth, SequentialIds, test_clock};
use lunamart_web::{AppState, app_router};
use serde_json::{Value, json};
use std::sync::Arc;

fn server() -> TestServer {
    let state = AppState::new(
        MemoryCollections::shared(),
        Arc::new(FakeAuth::signed_in("alpha@gmail.com", "Password")),
        Arc::new(test_clock()),
        Arc::new(SequentialIds::new("id")),
    );
    TestServer::new(app_router(state)).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn login_round_trip() {
    let server = server();

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({"email": "alpha@gmail.com", "password": "wrong"}))
        .await;
    response.assert_status(http::StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({"email": "alpha@gmail.com", "password": "Password"}))
        .await;
    response.assert_status_ok();
    let profile: Value = response.json();
    assert_eq!(profile["email"], json!("alpha@gmail.com"));
}

#[tokio::test]
async fn product_ids_are_assigned_sequentially() {
    let server = server();

    let first = server
        .post("/api/v1/products")
        .json(&json!({"name": "Reading Glasses", "category": "Frames", "stock": 5}))
        .await;
    first.assert_status(http::StatusCode::CREATED);
    let first: Value = first.json();
    assert_eq!(first["id"], json!(80_000_001));

    let second = server
        .post("/api/v1/products")
        .json(&json!({"name": "Lens Wipes", "category": "Care", "stock": 30}))
        .await;
    let second: Value = second.json();
    assert_eq!(second["id"], json!(80_000_002));
}

/// Scenarios A→C over HTTP: pending purchase, then received, then an
/// unchanged re-submission.
#[tokio::test]
async fn purchase_lifecycle_over_http() {
    let server = server();

    server
        .post("/api/v1/products")
        .json(&json!({"name": "Widget", "stock": 0}))
        .await
        .assert_status(http::StatusCode::CREATED);

    // Scenario A: pending, amount 0, no stock movement.
    let pending = server
        .post("/api/v1/purchases/submit")
        .json(&json!({
            "supplier": "Acme",
            "status": "Pending",
            "products": [
                {"product_id": 80_000_001, "name": "Widget", "quantity": 10}
            ]
        }))
        .await;
    pending.assert_status(http::StatusCode::CREATED);
    let pending: Value = pending.json();
    assert_eq!(pending["amount"], json!(0));

    let history: Value = server.get("/api/v1/stock-history").await.json();
    assert_eq!(history.as_array().unwrap().len(), 0);

    // Scenario B: received in full at ₱5 → amount 50 pesos, stock +10.
    let received = server
        .post("/api/v1/purchases/submit")
        .json(&json!({
            "id": pending["id"],
            "supplier": "Acme",
            "status": "Received",
            "products": [
                {"product_id": 80_000_001, "name": "Widget", "quantity": 10,
                 "price": 500, "received_quantity": 10}
            ]
        }))
        .await;
    received.assert_status_ok();
    let received: Value = received.json();
    assert_eq!(received["amount"], json!(5000));

    let products: Value = server.get("/api/v1/products").await.json();
    assert_eq!(products[0]["stock"], json!(10));

    let history: Value = server.get("/api/v1/stock-history").await.json();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["stock_adjustment"], json!(10));

    // Scenario C: unchanged re-submission is a no-op.
    let resubmit = server
        .post("/api/v1/purchases/submit")
        .json(&json!({
            "id": pending["id"],
            "supplier": "Acme",
            "status": "Received",
            "products": [
                {"product_id": 80_000_001, "name": "Widget", "quantity": 10,
                 "price": 500, "received_quantity": 10}
            ]
        }))
        .await;
    resubmit.assert_status_ok();

    let products: Value = server.get("/api/v1/products").await.json();
    assert_eq!(products[0]["stock"], json!(10));
    let history: Value = server.get("/api/v1/stock-history").await.json();
    assert_eq!(history.as_array().unwrap().len(), 1);
}

/// Scenario D over HTTP: a received quantity past the order clamps.
#[tokio::test]
async fn received_quantity_clamps_over_http() {
    let server = server();
    server
        .post("/api/v1/products")
        .json(&json!({"name": "Widget", "stock": 0}))
        .await
        .assert_status(http::StatusCode::CREATED);

    let received = server
        .post("/api/v1/purchases/submit")
        .json(&json!({
            "supplier": "Acme",
            "status": "Received",
            "products": [
                {"product_id": 80_000_001, "name": "Widget", "quantity": 10,
                 "price": 500, "received_quantity": 15}
            ]
        }))
        .await;
    let received: Value = received.json();
    assert_eq!(received["products"][0]["received_quantity"], json!(10));
}

#[tokio::test]
async fn locked_purchase_edits_conflict() {
    let server = server();
    server
        .post("/api/v1/products")
        .json(&json!({"name": "Widget", "stock": 0}))
        .await
        .assert_status(http::StatusCode::CREATED);

    let received: Value = server
        .post("/api/v1/purchases/submit")
        .json(&json!({
            "supplier": "Acme",
            "status": "Received",
            "products": [
                {"product_id": 80_000_001, "name": "Widget", "quantity": 10,
                 "price": 500, "received_quantity": 10}
            ]
        }))
        .await
        .json();

    // Changing the ordered quantity of a completed purchase is a conflict.
    let forged = server
        .post("/api/v1/purchases/submit")
        .json(&json!({
            "id": received["id"],
            "supplier": "Acme",
            "status": "Received",
            "products": [
                {"product_id": 80_000_001, "name": "Widget", "quantity": 99,
                 "price": 500, "received_quantity": 10}
            ]
        }))
        .await;
    forged.assert_status(http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_supplier_is_unprocessable() {
    let server = server();
    let response = server
        .post("/api/v1/purchases/submit")
        .json(&json!({
            "supplier": "",
            "status": "Pending",
            "products": [
                {"product_id": 80_000_001, "name": "Widget", "quantity": 1}
            ]
        }))
        .await;
    response.assert_status(http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn checkout_decrements_stock_and_reports() {
    let server = server();
    server
        .post("/api/v1/products")
        .json(&json!({"name": "Widget", "stock": 10, "sell_price": 500}))
        .await
        .assert_status(http::StatusCode::CREATED);

    let receipt = server
        .post("/api/v1/pos/checkout")
        .json(&json!({
            "customer": "Maria",
            "items": [{"product_id": 80_000_001, "quantity": 3}]
        }))
        .await;
    receipt.assert_status(http::StatusCode::CREATED);
    let receipt: Value = receipt.json();
    assert_eq!(receipt["total"], json!(1500));

    let products: Value = server.get("/api/v1/products").await.json();
    assert_eq!(products[0]["stock"], json!(7));

    let report: Value = server.get("/api/v1/sales-report").await.json();
    assert_eq!(report["total_sales"], json!(1500));
    assert_eq!(report["sales"].as_array().unwrap().len(), 1);

    let history: Value = server.get("/api/v1/stock-history").await.json();
    assert_eq!(history[0]["stock_adjustment"], json!(-3));

    let notifications: Value = server.get("/api/v1/notifications").await.json();
    assert_eq!(
        notifications["unread"]["message"],
        json!("Maria purchased 1 items.")
    );
}

#[tokio::test]
async fn checkout_past_stock_is_rejected() {
    let server = server();
    server
        .post("/api/v1/products")
        .json(&json!({"name": "Widget", "stock": 0, "sell_price": 500}))
        .await
        .assert_status(http::StatusCode::CREATED);

    let response = server
        .post("/api/v1/pos/checkout")
        .json(&json!({
            "customer": "Maria",
            "items": [{"product_id": 80_000_001, "quantity": 1}]
        }))
        .await;
    response.assert_status(http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn overview_reflects_the_ledgers() {
    let server = server();
    server
        .post("/api/v1/products")
        .json(&json!({"name": "Widget", "stock": 3}))
        .await
        .assert_status(http::StatusCode::CREATED);
    server
        .post("/api/v1/products")
        .json(&json!({"name": "Lens", "stock": 40}))
        .await
        .assert_status(http::StatusCode::CREATED);

    let overview: Value = server.get("/api/v1/overview").await.json();
    assert_eq!(overview["overview"]["total_products"], json!(2));
    assert_eq!(overview["overview"]["low_stock_count"], json!(1));
    assert_eq!(overview["overview"]["total_stock_units"], json!(43));
    assert_eq!(overview["low_stock"][0]["name"], json!("Widget"));
    assert_eq!(overview["top_products"][0]["name"], json!("Lens"));
}

#[tokio::test]
async fn barcode_labels_flatten() {
    let server = server();
    let response = server
        .post("/api/v1/barcode/labels")
        .json(&json!({
            "selections": [
                {"product_id": 80_000_001, "product_name": "Widget", "quantity": 2},
                {"product_id": null, "product_name": "Hand-labelled", "quantity": 0}
            ]
        }))
        .await;
    let body: Value = response.json();
    let labels = body["labels"].as_array().unwrap();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0]["value"], json!("80000001"));
    assert_eq!(labels[2]["value"], json!("Hand-labelled"));
}

#[tokio::test]
async fn settings_profile_and_password() {
    let server = server();

    let profile: Value = server.get("/api/v1/settings/profile").await.json();
    assert_eq!(profile["email"], json!("alpha@gmail.com"));

    let updated = server
        .patch("/api/v1/settings/profile")
        .json(&json!({"display_name": "Alpha"}))
        .await;
    updated.assert_status_ok();
    let updated: Value = updated.json();
    assert_eq!(updated["display_name"], json!("Alpha"));

    server
        .post("/api/v1/settings/password")
        .json(&json!({"current": "wrong", "new": "next"}))
        .await
        .assert_status(http::StatusCode::UNAUTHORIZED);

    server
        .post("/api/v1/settings/password")
        .json(&json!({"current": "Password", "new": "next"}))
        .await
        .assert_status(http::StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn archive_toggles_soft_delete() {
    let server = server();
    server
        .post("/api/v1/products")
        .json(&json!({"name": "Widget", "stock": 1}))
        .await
        .assert_status(http::StatusCode::CREATED);

    server
        .post("/api/v1/products/80000001/archive")
        .json(&json!({"archived": true}))
        .await
        .assert_status(http::StatusCode::NO_CONTENT);

    let products: Value = server.get("/api/v1/products").await.json();
    assert_eq!(products[0]["archived"], json!(true));

    // Archived products disappear from filtered (active) listings.
    let active: Value = server.get("/api/v1/products?q=widget").await.json();
    assert_eq!(active.as_array().unwrap().len(), 0);
}

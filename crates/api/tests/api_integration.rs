//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use checkout::{InMemoryNotificationService, InMemoryPaymentService};
use domain::{Catalog, Money, Product};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn catalog() -> Catalog {
    Catalog::from_products([
        Product::new("P1", "Rose Bouquet", Money::from_major(100)).with_attribute("color", "red"),
        Product::new("P2", "Chocolate Box", Money::from_major(45)),
    ])
    .unwrap()
}

fn setup() -> (
    axum::Router,
    InMemoryPaymentService,
    InMemoryNotificationService,
) {
    let payment = InMemoryPaymentService::new();
    let notifications = InMemoryNotificationService::new();
    let state = api::create_state(catalog(), payment.clone(), notifications.clone());
    let app = api::create_app(state, get_metrics_handle());
    (app, payment, notifications)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn post_order(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/process-order")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn order_body(product_id: &str, quantity: u32, location: &str) -> String {
    json!({
        "product_id": product_id,
        "quantity": quantity,
        "location": location,
        "phone": "501234567",
        "customer_name": "Aisha"
    })
    .to_string()
}

#[tokio::test]
async fn test_home_page() {
    let (app, _, _) = setup();
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Welcome to the order service!");
}

#[tokio::test]
async fn test_favicon_is_empty() {
    let (app, _, _) = setup();
    let (status, body) = get(app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let (app, _, _) = setup();
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["products"], 2);
}

#[tokio::test]
async fn test_redirect_pages() {
    let (app, _, _) = setup();
    let (status, body) = get(app.clone(), "/success").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Payment successful.");

    let (status, body) = get(app, "/cancel").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Payment cancelled.");
}

#[tokio::test]
async fn test_list_products() {
    let (app, _, _) = setup();
    let (status, body) = get(app, "/api/products").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["P1"]["title"], "Rose Bouquet");
    assert_eq!(json["P1"]["price"], 100);
    assert_eq!(json["P1"]["color"], "red");
    assert_eq!(json["P2"]["price"], 45);
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_process_order() {
    let (app, payment, notifications) = setup();

    let (status, json) = post_order(app, order_body("P1", 2, "Dubai")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Order processed successfully");
    assert_eq!(json["total"], 2700);
    let order_number = json["order_number"].as_str().unwrap();
    assert!(order_number.starts_with("ORD-"));
    assert_eq!(order_number.len(), 18);
    assert!(json["checkout_url"].as_str().unwrap().starts_with("https://"));

    let requests = payment.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount.minor(), 270_000);

    let sent = notifications.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].order_number.as_str(), order_number);
    assert_eq!(sent[0].payment_link, json["checkout_url"].as_str().unwrap());
}

#[tokio::test]
async fn test_unserved_location_has_no_fee() {
    let (app, _, _) = setup();
    let (status, json) = post_order(app, order_body("P2", 3, "Muscat")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 135);
}

#[tokio::test]
async fn test_unknown_product() {
    let (app, payment, notifications) = setup();

    let (status, json) = post_order(app, order_body("P999", 1, "Dubai")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "Invalid product ID" }));
    assert_eq!(payment.session_count(), 0);
    assert_eq!(notifications.sent_count(), 0);
}

#[tokio::test]
async fn test_total_out_of_range() {
    let payment = InMemoryPaymentService::new();
    let catalog = Catalog::from_products([Product::new(
        "P1",
        "Gold Bouquet",
        Money::from_major(30_000_000),
    )])
    .unwrap();
    let state = api::create_state(catalog, payment.clone(), InMemoryNotificationService::new());
    let app = api::create_app(state, get_metrics_handle());

    let (status, json) = post_order(app, order_body("P1", u32::MAX, "Dubai")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("out of range"));
    assert_eq!(payment.session_count(), 0);
}

#[tokio::test]
async fn test_missing_field() {
    let (app, payment, _) = setup();

    let body = json!({ "product_id": "P1", "quantity": 1, "location": "Dubai" }).to_string();
    let (status, json) = post_order(app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("phone"));
    assert_eq!(payment.session_count(), 0);
}

#[tokio::test]
async fn test_zero_quantity() {
    let (app, payment, _) = setup();
    let (status, json) = post_order(app, order_body("P1", 0, "Dubai")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(payment.session_count(), 0);
}

#[tokio::test]
async fn test_malformed_json() {
    let (app, _, _) = setup();
    let (status, json) = post_order(app, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_payment_failure() {
    let (app, payment, notifications) = setup();
    payment.set_fail_on_create(true);

    let (status, json) = post_order(app, order_body("P1", 1, "Dubai")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].is_string());
    assert_eq!(notifications.sent_count(), 0);
}

#[tokio::test]
async fn test_notification_failure_still_succeeds() {
    let (app, payment, notifications) = setup();
    notifications.set_fail_on_send(true);

    let (status, json) = post_order(app, order_body("P1", 1, "Sharjah")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2100);
    assert_eq!(payment.session_count(), 1);
}

#[tokio::test]
async fn test_webhook_acknowledges() {
    let (app, _, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"type":"checkout.session.completed"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({ "status": "Received" }));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _, _) = setup();

    let (status, _) = post_order(app.clone(), order_body("P1", 1, "Dubai")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("orders_processed_total"), "{text}");
}

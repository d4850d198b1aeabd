//! HTTP API integration tests
//!
//! Drives the full router against an in-memory store.

mod common;

use std::sync::atomic::Ordering;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::{test_app, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn multipart_csv(uri: &str, csv: &str) -> Request<Body> {
    let boundary = "XFORECASTBOUNDARY";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"ventas.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = boundary,
        csv = csv
    );
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().unwrap(),
        other => other.as_f64().unwrap(),
    }
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_database_status() {
    let store = MemoryStore::new();
    store.add_sale("Palta", "2023-01", "10");
    store.add_sale("Mango", "2023-01", "10");

    let (status, body) = send(test_app(&store), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["tracked_crops"], 2);

    store.sales_down.store(true, Ordering::SeqCst);
    let (status, body) = send(test_app(&store), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
    assert!(body.get("tracked_crops").is_none());
}

// ============================================================================
// Sales
// ============================================================================

#[tokio::test]
async fn test_record_sale_and_list() {
    let store = MemoryStore::new();

    let (status, body) = send(
        test_app(&store),
        post_json(
            "/api/v1/sales",
            json!({"crop": "Palta", "date": "2023-10-01", "volume_kg": "500", "unit_price": "5.00"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["crop"], "Palta");
    assert_eq!(body["date"], "2023-10-01");

    send(
        test_app(&store),
        post_json(
            "/api/v1/sales",
            json!({"crop": "Palta", "date": "2023-11-01", "volume_kg": 700}),
        ),
    )
    .await;

    let (status, body) = send(test_app(&store), get("/api/v1/sales?crop=Palta")).await;
    assert_eq!(status, StatusCode::OK);
    let sales = body.as_array().unwrap();
    assert_eq!(sales.len(), 2);
    // newest first
    assert_eq!(sales[0]["date"], "2023-11-01");
}

#[tokio::test]
async fn test_record_sale_validation_error() {
    let store = MemoryStore::new();

    let (status, body) = send(
        test_app(&store),
        post_json(
            "/api/v1/sales",
            json!({"crop": "Palta", "date": "2023-10-01", "volume_kg": -10}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "volume_kg");
    assert_eq!(store.sales_count(), 0);
}

#[tokio::test]
async fn test_record_sale_rejects_volume_above_limit() {
    let store = MemoryStore::new();

    let (status, body) = send(
        test_app(&store),
        post_json(
            "/api/v1/sales",
            json!({"crop": "Mango", "date": "2023-10-01", "volume_kg": "40000000000000000000000000000"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "volume_kg");
    assert_eq!(store.sales_count(), 0);
}

#[tokio::test]
async fn test_list_crops() {
    let store = MemoryStore::new();
    store.add_sale("Palta", "2023-01", "10");
    store.add_sale("Mango", "2023-01", "10");
    store.add_sale("Palta", "2023-02", "10");

    let (status, body) = send(test_app(&store), get("/api/v1/crops")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Mango", "Palta"]));
}

#[tokio::test]
async fn test_csv_import() {
    let store = MemoryStore::new();
    let csv = "cultivo,fecha,volumen_kg,precio_unitario\nMango,2023-01,1000,2\nMango,2023-02,2000,2\n";

    let (status, body) = send(test_app(&store), multipart_csv("/api/v1/sales/import", csv)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["imported"], 2);
    assert_eq!(store.sales_count(), 2);
}

#[tokio::test]
async fn test_csv_import_is_all_or_nothing() {
    let store = MemoryStore::new();
    let csv = "crop,date,volume_kg,unit_price\nMango,2023-01,1000,2\nMango,2023-02,abc,2\n";

    let (status, body) = send(test_app(&store), multipart_csv("/api/v1/sales/import", csv)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "CSV_IMPORT_ERROR");
    assert_eq!(store.sales_count(), 0);
}

// ============================================================================
// Weather
// ============================================================================

#[tokio::test]
async fn test_record_weather_and_fetch_latest() {
    let store = MemoryStore::new();

    let (status, body) = send(test_app(&store), get("/api/v1/weather/latest")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = send(
        test_app(&store),
        post_json(
            "/api/v1/weather",
            json!({"date": "2023-12", "temperature_celsius": 28, "precipitation_mm": 50, "event": "El Niño"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event"], "El Niño");

    let (_, body) = send(test_app(&store), get("/api/v1/weather/latest")).await;
    assert_eq!(body["event"], "El Niño");
    assert_eq!(body["date"], "2023-12");
}

#[tokio::test]
async fn test_record_weather_without_event_uses_sentinel() {
    let store = MemoryStore::new();

    let (status, body) = send(
        test_app(&store),
        post_json(
            "/api/v1/weather",
            json!({"date": "2023-12", "temperature_celsius": 22, "precipitation_mm": 0}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event"], "None");
}

// ============================================================================
// Forecasts
// ============================================================================

#[tokio::test]
async fn test_forecast_endpoint() {
    let store = MemoryStore::new();
    store.add_sale("Mango", "2023-01", "1000");
    store.add_weather("2023-12", Some("35"), "None");

    let (status, body) = send(
        test_app(&store),
        post_json("/api/v1/forecasts", json!({"crop": "Mango"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], false);
    assert_eq!(body["crop"], "Mango");
    assert_eq!(as_f64(&body["final_prediction"]), 850.0);
    assert_eq!(body["adjustment_percent"], 15);
    assert_eq!(body["is_alert"], true);
    assert_eq!(body["sample_size"], 1);
}

#[tokio::test]
async fn test_forecast_unknown_crop_is_structured_error() {
    let store = MemoryStore::new();

    let (status, body) = send(
        test_app(&store),
        post_json("/api/v1/forecasts", json!({"crop": "Quinua"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "No historical data for Quinua.");
    assert!(body.get("final_prediction").is_none());
}

#[tokio::test]
async fn test_forecast_sales_outage_is_service_unavailable() {
    let store = MemoryStore::new();
    store.sales_down.store(true, Ordering::SeqCst);

    let (status, body) = send(
        test_app(&store),
        post_json("/api/v1/forecasts", json!({"crop": "Mango"})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "SALES_DATA_UNAVAILABLE");
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use openf1_proxy::{build_router, Envelope, OpenF1Client};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn app_for(server: &MockServer) -> axum::Router {
    let client = OpenF1Client::new(&server.base_url(), "F1-Dashboard/1.0").unwrap();
    build_router(Arc::new(client), &["http://localhost:5173".to_string()]).unwrap()
}

async fn call(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_end_to_end_drivers() {
    let server = MockServer::start();
    let mock_data = json!([
        {"driver_number": 1, "broadcast_name": "M VERSTAPPEN", "session_key": 9158},
        {"driver_number": 11, "broadcast_name": "S PEREZ", "session_key": 9158}
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/drivers")
            .query_param("session_key", "latest");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data.clone());
    });

    let (status, body) = call(app_for(&server), "/api/drivers?session_key=latest").await;

    api_mock.assert();
    assert_eq!(status, StatusCode::OK);

    let envelope: Envelope = serde_json::from_slice(&body).unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.count, 2);
    assert_eq!(json!(envelope.data), mock_data);
}

#[tokio::test]
async fn test_end_to_end_upstream_failure() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/car_data")
            .query_param("session_key", "9158")
            .query_param("driver_number", "1");
        then.status(502);
    });

    let (status, body) = call(app_for(&server), "/api/telemetry/9158?driver_number=1").await;

    api_mock.assert();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!({"success": false, "message": "Failed to fetch data from OpenF1 API"})
    );
}

#[tokio::test]
async fn test_end_to_end_sessions_with_filters() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sessions")
            .query_param("year", "2023")
            .query_param("session_type", "Race");
        then.status(200).json_body(json!([
            {"session_key": 9158, "session_name": "Race", "country_name": "Singapore"}
        ]));
    });

    let (status, body) = call(
        app_for(&server),
        "/api/sessions?year=2023&session_type=Race",
    )
    .await;

    api_mock.assert();
    assert_eq!(status, StatusCode::OK);
    let envelope: Envelope = serde_json::from_slice(&body).unwrap();
    assert_eq!(envelope.count, 1);
    assert_eq!(envelope.data[0]["country_name"], "Singapore");
}

#[tokio::test]
async fn test_cors_preflight_for_configured_origin() {
    let server = MockServer::start();

    let resp = app_for(&server)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/drivers")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}

#[tokio::test]
async fn test_cors_preflight_mirrors_requested_method() {
    let server = MockServer::start();

    let resp = app_for(&server)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/drivers")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "PUT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(resp.status().is_success());
    let allowed = resp
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(allowed.contains("PUT"), "allow-methods was {:?}", allowed);
}

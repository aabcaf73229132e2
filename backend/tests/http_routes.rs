mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use cropwatch::http::{create_router, AppState};
use support::small_config;

fn state() -> AppState {
    AppState::new(small_config())
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = create_router(state.clone()).oneshot(request).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    send(state, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn load(state: &AppState, body: &str) -> serde_json::Value {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/datasets")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, body) = send(state, request).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_before_load() {
    let state = state();
    let (status, _, body) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["generation"], 0);
}

#[tokio::test]
async fn test_current_dataset_404_before_load() {
    let state = state();
    let (status, _, body) = get(&state, "/v1/datasets/current/statistics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_load_demo_and_read_views() {
    let state = state();
    let summary = load(&state, r#"{"source": "demo", "seed": 42}"#).await;
    assert_eq!(summary["generation"], 1);
    assert_eq!(summary["seed"], 42);
    assert_eq!(summary["dataSource"], "Demo Data");
    assert_eq!(summary["totalPixels"], 600);

    let (status, _, body) = get(&state, "/v1/datasets/current/statistics").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["statistics"]["NDVI"]["mean"].is_number());
    assert_eq!(json["rows"].as_array().unwrap().len(), 4);

    let (_, _, body) = get(&state, "/v1/datasets/current/labels").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let counts = &json["labelCounts"];
    assert_eq!(
        counts["healthy"].as_u64().unwrap() + counts["stressed"].as_u64().unwrap(),
        600
    );

    let (_, _, body) = get(&state, "/v1/datasets/current/alerts").await;
    let alerts: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(!alerts.as_array().unwrap().is_empty());

    let (_, _, body) = get(&state, "/v1/datasets/current/sensors").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 30);
    assert!(json["summary"]["soilMoisture"]["current"].is_number());
}

#[tokio::test]
async fn test_fused_features() {
    let state = state();
    load(&state, r#"{"source": "demo", "seed": 9}"#).await;

    let (status, _, body) = get(&state, "/v1/datasets/current/features").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["rows"], 600);
    assert_eq!(json["columns"][0], "NDVI");
    assert_eq!(json["columns"][7], "leaf_wetness");
    assert_eq!(json["data"].as_array().unwrap().len(), 600 * 8);

    let (status, _, _) = get(&state, "/v1/datasets/current/features?date=2000-01-01").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = get(&state, "/v1/datasets/current/features?date=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reload_bumps_generation() {
    let state = state();
    load(&state, r#"{"source": "demo", "seed": 1}"#).await;
    let summary = load(&state, r#"{"source": "upload", "seed": 1}"#).await;
    assert_eq!(summary["generation"], 2);
    assert_eq!(summary["imageShape"], serde_json::json!([120, 150, 224]));

    let (_, _, body) = get(&state, "/v1/datasets/current").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["source"], "upload");
}

#[tokio::test]
async fn test_map_returns_raw_rgba() {
    let state = state();
    load(&state, r#"{"source": "demo", "seed": 3}"#).await;

    let (status, headers, body) = get(&state, "/v1/datasets/current/maps/ndvi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-image-width"], "24");
    assert_eq!(headers["x-image-height"], "16");
    assert_eq!(body.len(), 24 * 16 * 4);

    let (status, headers, body) =
        get(&state, "/v1/datasets/current/overlays/pest-risk?width=5&height=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-image-width"], "5");
    assert_eq!(body.len(), 5 * 7 * 4);

    // Same snapshot, same pixels.
    let (_, _, again) =
        get(&state, "/v1/datasets/current/overlays/pest-risk?width=5&height=7").await;
    assert_eq!(body, again);
}

#[tokio::test]
async fn test_unknown_map_is_404() {
    let state = state();
    load(&state, r#"{"source": "demo", "seed": 3}"#).await;
    let (status, _, _) = get(&state, "/v1/datasets/current/maps/evi").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_render_is_400() {
    let state = state();
    load(&state, r#"{"source": "demo", "seed": 3}"#).await;
    let (status, _, _) = get(&state, "/v1/datasets/current/maps/soil?width=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _, _) = get(&state, "/v1/datasets/current/overlays/stress?height=99999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_source_is_rejected() {
    let state = state();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/datasets")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"source": "satellite"}"#))
        .unwrap();
    let (status, _, _) = send(&state, request).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_export_and_reports() {
    let state = state();
    load(&state, r#"{"source": "demo", "seed": 8}"#).await;

    let (status, _, body) = get(&state, "/v1/datasets/current/export").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["dataSource"], "Demo Data");
    assert_eq!(json["sensorData"].as_array().unwrap().len(), 10);

    let (status, headers, body) = get(&state, "/v1/datasets/current/report").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/plain"));
    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("AI-POWERED CROP MONITORING REPORT"));

    let (_, _, body) = get(&state, "/v1/datasets/current/report/images").await;
    assert!(String::from_utf8(body).unwrap().contains("Soil Index Map"));

    let (_, _, body) = get(&state, "/v1/datasets/current/legends").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["maps"].as_array().unwrap().len(), 4);
    assert_eq!(json["overlays"][1]["overlay"], "pest-risk");
}

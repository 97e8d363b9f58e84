//! Integration tests for the API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The state is built from the shipped dataset so
//! counts and cross-references match what a running server would serve.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use snowtooth_api::router::build_router;
use snowtooth_api::state::AppState;
use snowtooth_core::config::NotificationConfig;
use snowtooth_core::{Dataset, ResortContext};
use snowtooth_types::{Status, StatusChange, Topic};
use tower::ServiceExt;

const LIFTS: &str = include_str!("../../../data/lifts.json");
const TRAILS: &str = include_str!("../../../data/trails.json");

fn make_test_state() -> Arc<AppState> {
    let dataset = Dataset::from_json(LIFTS, TRAILS).unwrap();
    let resort = ResortContext::from_dataset(dataset, &NotificationConfig::default()).unwrap();
    Arc::new(AppState::new(resort))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: &Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn put_status(router: &Router, path: &str, status: &str) -> (StatusCode, Value) {
    let body = serde_json::json!({ "status": status }).to_string();
    let response = router
        .clone()
        .oneshot(
            Request::put(path)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("lifts HOLD"));
    assert!(html.contains("trails CLOSED"));
}

#[tokio::test]
async fn test_list_lifts() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/api/lifts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 11);
    assert_eq!(json["lifts"][0]["id"], "astra-express");
    assert!(json["lifts"][0]["trails"].is_array());
}

#[tokio::test]
async fn test_list_lifts_filter_open() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/api/lifts?status=OPEN").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 5);
    for lift in json["lifts"].as_array().unwrap() {
        assert_eq!(lift["status"], "OPEN");
    }
}

#[tokio::test]
async fn test_list_lifts_invalid_status_is_bad_request() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/api/lifts?status=open").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("open"));
}

#[tokio::test]
async fn test_counts() {
    let router = build_router(make_test_state());

    assert_eq!(get(&router, "/api/lifts/count").await.1["count"], 11);
    assert_eq!(get(&router, "/api/lifts/count?status=HOLD").await.1["count"], 3);
    assert_eq!(get(&router, "/api/trails/count").await.1["count"], 13);
    assert_eq!(get(&router, "/api/trails/count?status=OPEN").await.1["count"], 8);
    assert_eq!(get(&router, "/api/trails/count?status=CLOSED").await.1["count"], 3);
}

#[tokio::test]
async fn test_get_lift_by_id() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/api/lifts/panorama").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Panorama");
    assert_eq!(json["status"], "OPEN");
}

#[tokio::test]
async fn test_get_unknown_lift_is_null() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/api/lifts/gondola").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.is_null());

    let (status, json) = get(&router, "/api/trails/gondola/lift-access").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.is_null());
}

#[tokio::test]
async fn test_lift_trail_access_follows_dataset_order() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/api/lifts/panorama/trail-access").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    let ids: Vec<&str> = json["trails"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["blue-bird", "summit-saddle", "hemmed-slacks"]);
}

#[tokio::test]
async fn test_trail_lift_access() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/api/trails/meatball/lift-access").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trail"], "meatball");
    assert_eq!(json["lifts"][0]["id"], "jolly-roger");
    assert_eq!(json["lifts"][1]["id"], "neptune-rope");
}

#[tokio::test]
async fn test_set_lift_status_notifies_subscriber() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));
    let mut sub = state.resort.subscribe(Topic::LiftStatusChange);

    let (status, json) = put_status(&router, "/api/lifts/panorama/status", "HOLD").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "panorama");
    assert_eq!(json["status"], "HOLD");

    let Some(StatusChange::Lift(lift)) = sub.try_next() else {
        panic!("expected a lift status change");
    };
    assert_eq!(lift.id.as_str(), "panorama");
    assert_eq!(lift.status, Status::Hold);
    assert!(sub.try_next().is_none());

    let (_, json) = get(&router, "/api/lifts?status=OPEN").await;
    assert_eq!(json["count"], 4);
}

#[tokio::test]
async fn test_set_trail_status_does_not_touch_lift_topic() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));
    let mut lifts = state.resort.subscribe(Topic::LiftStatusChange);
    let mut trails = state.resort.subscribe(Topic::TrailStatusChange);

    let (status, json) = put_status(&router, "/api/trails/blue-bird/status", "CLOSED").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "CLOSED");

    assert!(trails.try_next().is_some());
    assert!(lifts.try_next().is_none());
}

#[tokio::test]
async fn test_set_status_unknown_id_is_not_found() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));
    let mut sub = state.resort.subscribe(Topic::TrailStatusChange);

    let (status, json) = put_status(&router, "/api/trails/gondola/status", "OPEN").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert!(sub.try_next().is_none());
}

#[tokio::test]
async fn test_set_status_invalid_value_is_bad_request() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let (status, _) = put_status(&router, "/api/lifts/summit/status", "MELTED").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = get(&router, "/api/lifts/summit").await;
    assert_eq!(json["status"], "CLOSED");
}

#[tokio::test]
async fn test_unknown_ws_topic_is_not_found() {
    let router = build_router(make_test_state());

    let (status, json) = get(&router, "/ws/snowfall").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("snowfall"));
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

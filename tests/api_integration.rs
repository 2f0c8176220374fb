//! Router-level tests for the REST API.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use tou_planner::api::{AppState, router};
use tou_planner::sim::aggregate::recompute;

fn app_state() -> Arc<AppState> {
    let config = common::default_config();
    let devices = vec![
        common::lpg_stove("stove", &[18, 19], 2.0),
        common::selected("heater", 1500.0, &[7], 1.0),
    ];
    let state = recompute(&devices, &config);
    Arc::new(AppState { config, state })
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(app_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn state_reports_scenarios_per_device() {
    let (status, json) = get("/state").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["baseline"]["scenario"], "baseline");
    assert_eq!(json["optimized"]["scenario"], "optimized_electric");
    let daily = |scenario: &str| json[scenario]["by_device"]["stove"]["daily"].as_f64();
    assert!(daily("baseline").is_some_and(|d| (d - 30.0).abs() < 1e-9));
    assert_eq!(daily("current"), Some(80.0));
    assert!(json["grid"]["load_factor"].is_number());
    assert!(json["grid"]["device_contribution_pct"]["heater"].is_number());
}

#[tokio::test]
async fn optimized_profile_moves_load_off_peak() {
    let (status, json) = get("/profile?view=optimized&from=1080&to=1320").await;
    assert_eq!(status, StatusCode::OK);
    let points = json.as_array().cloned().unwrap_or_default();
    assert_eq!(points.len(), 17);
    for p in &points {
        if p["band"] == "peak" {
            assert_eq!(p["total_watts"], 0.0, "at {}", p["time"]);
        }
    }
}

#[tokio::test]
async fn profile_rejects_reversed_range() {
    let (status, json) = get("/profile?from=100&to=50").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some());
}

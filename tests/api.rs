use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use rest_timer::{
    api::create_router,
    services::StaticEntitlements,
    state::{AppState, PresetCatalog},
    tasks::ManualClock,
};

fn app() -> (Arc<ManualClock>, Router) {
    let clock = Arc::new(ManualClock::new());
    let state = AppState::new(
        clock.clone(),
        Duration::from_secs(1),
        PresetCatalog::default(),
        Arc::new(StaticEntitlements::new(["coach-pro"])),
    );
    (clock, create_router(Arc::new(state)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn mount_timer(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/timers", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_and_presets() {
    let (_, app) = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/presets", None).await;
    assert_eq!(status, StatusCode::OK);
    let seconds: Vec<u64> = body["presets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["seconds"].as_u64().unwrap())
        .collect();
    assert_eq!(seconds, vec![30, 60, 90, 120, 180, 300]);
    assert_eq!(body["presets"][2]["label"], "01:30");
}

#[tokio::test]
async fn timer_counts_pauses_and_resets() {
    let (clock, app) = app();
    let id = mount_timer(&app).await;

    let (_, body) = send(&app, Method::POST, &format!("/timers/{id}/start"), None).await;
    assert_eq!(body["status"], "running");

    clock.fire_n(65);
    let (_, body) = send(&app, Method::POST, &format!("/timers/{id}/pause"), None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["elapsed_seconds"], 65);
    assert_eq!(body["display"], "01:05");
    assert_eq!(body["target_seconds"], Value::Null);

    clock.fire_n(10);
    let (_, body) = send(&app, Method::GET, &format!("/timers/{id}"), None).await;
    assert_eq!(body["elapsed_seconds"], 65);

    let (_, body) = send(&app, Method::POST, &format!("/timers/{id}/reset"), None).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["display"], "00:00");
}

#[tokio::test]
async fn preset_runs_to_finish() {
    let (clock, app) = app();
    let id = mount_timer(&app).await;

    let (status, body) = send(&app, Method::POST, &format!("/timers/{id}/preset/90"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_running"], true);
    assert_eq!(body["remaining_seconds"], 90);

    clock.fire_n(95);
    let (_, body) = send(&app, Method::GET, &format!("/timers/{id}"), None).await;
    assert_eq!(body["status"], "finished");
    assert_eq!(body["elapsed_seconds"], 90);
    assert_eq!(body["remaining_seconds"], 0);
    assert_eq!(body["is_running"], false);
    assert_eq!(clock.active_subscriptions(), 0);
}

#[tokio::test]
async fn zero_preset_is_bad_request() {
    let (_, app) = app();
    let id = mount_timer(&app).await;

    let (status, body) = send(&app, Method::POST, &format!("/timers/{id}/preset/0"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("positive"));
}

#[tokio::test]
async fn unmount_releases_clock() {
    let (clock, app) = app();
    let id = mount_timer(&app).await;
    send(&app, Method::POST, &format!("/timers/{id}/start"), None).await;
    assert_eq!(clock.active_subscriptions(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/timers/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(clock.active_subscriptions(), 0);

    let (status, _) = send(&app, Method::GET, &format!("/timers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gate_lifecycle() {
    let (_, app) = app();

    let (status, body) = send(&app, Method::POST, "/gates", Some(json!({ "user_id": "coach-pro" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_visible"], false);
    assert_eq!(body["has_access"], true);

    let (_, body) = send(&app, Method::POST, "/gates", Some(json!({ "user_id": "free" }))).await;
    assert_eq!(body["is_visible"], true);
    let id = body["id"].as_str().unwrap().to_string();

    let (_, body) = send(&app, Method::POST, &format!("/gates/{id}/upgrade"), None).await;
    assert_eq!(body["navigate_to"], "subscription_offer");
    assert_eq!(body["gate"]["is_visible"], true);

    let (_, body) = send(&app, Method::POST, &format!("/gates/{id}/dismiss"), None).await;
    assert_eq!(body["is_visible"], false);
    assert_eq!(body["has_access"], false);

    let (status, _) = send(&app, Method::DELETE, &format!("/gates/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::POST, "/gates", Some(json!({ "user_id": "free" }))).await;
    assert_eq!(body["is_visible"], true);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (_, app) = app();
    let missing = uuid::Uuid::new_v4();

    let (status, _) = send(&app, Method::POST, &format!("/timers/{missing}/start"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, &format!("/gates/{missing}/dismiss"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not mounted"));
}

#[tokio::test]
async fn malformed_paths_return_json_errors() {
    let (_, app) = app();
    let id = mount_timer(&app).await;

    for uri in [
        format!("/timers/{id}/preset/-5"),
        format!("/timers/{id}/preset/4294967296"),
        "/timers/not-a-uuid".to_string(),
        "/gates/not-a-uuid/dismiss".to_string(),
    ] {
        let method = if uri.starts_with("/timers/not") { Method::GET } else { Method::POST };
        let (status, body) = send(&app, method, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}: {body}");
    }
}

#[tokio::test]
async fn malformed_gate_body_returns_json_error() {
    let (_, app) = app();

    let (status, body) = send(&app, Method::POST, "/gates", Some(json!({ "user": "free" }))).await;
    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}

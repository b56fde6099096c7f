//! Status manager and public poller against a stateful mock backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use folio_entity::status::{ClearAfter, StatusCategory};
use folio_service::status::{MIN_REFRESH_INTERVAL, StatusManager, StatusPoller};

use crate::helpers;

/// Backend-side status store: the last element of `history` is current
/// unless `cleared` is set.
#[derive(Debug, Default)]
struct StatusBackend {
    history: Vec<Value>,
    cleared: bool,
    last_request: Option<Value>,
}

type Shared = Arc<Mutex<StatusBackend>>;

async fn set_status(State(db): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut db = db.lock().unwrap();
    let id = format!("st{}", db.history.len() + 1);
    let record = helpers::user_status_json(
        &id,
        body["emoji"].as_str().unwrap_or_default(),
        body["message"].as_str().unwrap_or_default(),
    );
    db.history.push(record.clone());
    db.cleared = false;
    db.last_request = Some(body);
    Json(record)
}

async fn clear_status(State(db): State<Shared>) -> StatusCode {
    db.lock().unwrap().cleared = true;
    StatusCode::NO_CONTENT
}

async fn my_status(State(db): State<Shared>) -> Response {
    let db = db.lock().unwrap();
    match db.history.last().filter(|_| !db.cleared) {
        Some(record) => Json(record.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "No status"}))).into_response(),
    }
}

async fn history(State(db): State<Shared>) -> Json<Value> {
    let db = db.lock().unwrap();
    Json(Value::Array(db.history.iter().rev().cloned().collect()))
}

async fn status_backend() -> (Shared, String) {
    let db: Shared = Arc::default();
    let api = Router::new()
        .route("/status", get(my_status).post(set_status).delete(clear_status))
        .route("/status/me", get(my_status))
        .route("/status/history", get(history))
        .with_state(Arc::clone(&db));
    let base = helpers::serve(api).await;
    (db, base)
}

#[tokio::test]
async fn test_set_predefined_sends_catalog_entry() {
    let (db, base) = status_backend().await;
    let (_, _, services) = helpers::connect(&base);
    let manager = StatusManager::new(services.status.clone());

    let status = manager.set_predefined("meeting").await.unwrap();

    assert_eq!(status.emoji, "📅");
    assert_eq!(status.message, "Currently in a meeting");
    let sent = db.lock().unwrap().last_request.clone().unwrap();
    assert_eq!(sent["predefinedStatusId"], "meeting");
    assert_eq!(sent["clearAfter"], "today");

    let panel = manager.panel();
    assert!(!panel.loading);
    assert!(!panel.saving);
    assert_eq!(panel.current.unwrap().id, status.id);
    assert_eq!(panel.history.len(), 1);
}

#[tokio::test]
async fn test_unknown_preset_is_rejected_locally() {
    let (db, base) = status_backend().await;
    let (_, _, services) = helpers::connect(&base);
    let manager = StatusManager::new(services.status.clone());

    let err = manager.set_predefined("hibernating").await.unwrap_err();

    assert!(err.message.contains("hibernating"));
    assert!(db.lock().unwrap().last_request.is_none());
}

#[tokio::test]
async fn test_set_custom_trims_and_defaults_emoji() {
    let (db, base) = status_backend().await;
    let (_, _, services) = helpers::connect(&base);
    let manager = StatusManager::new(services.status.clone());

    let status = manager
        .set_custom("  ", "  Reviewing pull requests  ", ClearAfter::Minutes(30))
        .await
        .unwrap();

    assert_eq!(status.message, "Reviewing pull requests");
    let sent = db.lock().unwrap().last_request.clone().unwrap();
    assert_eq!(sent["emoji"], folio_entity::status::DEFAULT_EMOJI);
    assert_eq!(sent["clearAfter"], 30);
    assert!(sent.get("predefinedStatusId").is_none());
}

#[tokio::test]
async fn test_blank_custom_message_is_rejected() {
    let (db, base) = status_backend().await;
    let (_, _, services) = helpers::connect(&base);
    let manager = StatusManager::new(services.status.clone());

    assert!(manager.set_custom("🦀", "   ", ClearAfter::Never).await.is_err());
    let long = "x".repeat(81);
    assert!(manager.set_custom("🦀", &long, ClearAfter::Never).await.is_err());
    assert!(db.lock().unwrap().last_request.is_none());
}

#[tokio::test]
async fn test_clear_drops_current_and_keeps_history() {
    let (_, base) = status_backend().await;
    let (_, _, services) = helpers::connect(&base);
    let manager = StatusManager::new(services.status.clone()).with_history_limit(5);

    manager.set_predefined("coding").await.unwrap();
    manager.set_predefined("lunch").await.unwrap();
    manager.clear().await.unwrap();

    let panel = manager.panel();
    assert!(panel.current.is_none());
    assert_eq!(panel.history.len(), 2);
    assert!(!panel.saving);

    // A fresh load agrees with the backend.
    let fresh = StatusManager::new(services.status.clone());
    fresh.load().await;
    assert!(fresh.panel().current.is_none());
}

#[tokio::test]
async fn test_load_degrades_on_backend_failure() {
    let api = Router::new()
        .route("/status/me", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/status/history", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = StatusManager::new(services.status.clone());
    assert!(manager.panel().loading);

    manager.load().await;

    let panel = manager.panel();
    assert!(!panel.loading);
    assert!(panel.current.is_none());
    assert!(panel.history.is_empty());
}

#[tokio::test]
async fn test_poller_publishes_and_stops_on_cancel() {
    let api = Router::new().route(
        "/status/current",
        get(|| async {
            Json(json!({
                "emoji": "📅",
                "message": "Currently in a meeting",
                "isActive": true,
                "lastUpdated": chrono::Utc::now().to_rfc3339()
            }))
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let cancel = CancellationToken::new();
    let poller = StatusPoller::new(services.status.clone(), Duration::from_millis(50));
    let (mut rx, handle) = poller.spawn(cancel.clone());
    assert!(rx.borrow().is_none());

    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("poller published in time")
        .unwrap();
    let view = rx.borrow_and_update().clone().unwrap();
    assert_eq!(view.emoji, "📅");
    assert_eq!(view.category, StatusCategory::Busy);
    assert_eq!(view.time_ago, "just now");

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("poller stopped in time")
        .unwrap();
}

#[tokio::test]
async fn test_poller_reports_inactive_as_none() {
    let api = Router::new().route(
        "/status/current",
        get(|| async {
            Json(json!({
                "emoji": "💼",
                "message": "Working on something important",
                "isActive": false,
                "lastUpdated": "2026-10-16T08:00:00Z"
            }))
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let poller = StatusPoller::new(services.status.clone(), Duration::from_secs(60));
    assert!(poller.poll_once().await.is_none());
}

#[tokio::test]
async fn test_zero_interval_poller_still_runs() {
    let api = Router::new().route(
        "/status/current",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "No status"}))) }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let poller = StatusPoller::new(services.status.clone(), Duration::ZERO);
    assert_eq!(poller.interval(), MIN_REFRESH_INTERVAL);

    let cancel = CancellationToken::new();
    let (mut rx, handle) = poller.spawn(cancel.clone());
    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("poller published in time")
        .unwrap();
    assert!(rx.borrow().is_none());

    cancel.cancel();
    let joined = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("poller stopped in time");
    assert!(joined.is_ok());
}

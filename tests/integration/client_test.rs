//! API client behaviour against a live HTTP backend.

use std::sync::Arc;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use folio_client::AuthEvent;
use folio_client::services::ProjectFilters;
use folio_core::config::ApiConfig;
use folio_core::error::{ErrorKind, NO_RESPONSE_MESSAGE};
use folio_core::traits::SessionStore;
use folio_entity::user::UserRole;

use crate::helpers::{self, Recorder};

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start_matches("Bearer ").to_string())
}

fn profile_route(profile_hits: Arc<Recorder>) -> Router {
    Router::new().route(
        "/auth/profile",
        get(move |headers: HeaderMap| {
            let hits = Arc::clone(&profile_hits);
            async move {
                hits.hit(None);
                if bearer(&headers).as_deref() == Some("fresh") {
                    (
                        StatusCode::OK,
                        Json(json!({"name": "Ada", "email": "ada@example.com", "role": "ADMIN", "emailVerified": true})),
                    )
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Token expired"})))
                }
            }
        }),
    )
}

#[tokio::test]
async fn test_401_refreshes_and_replays_once() {
    let profile_hits = Recorder::new();
    let refresh_hits = Recorder::new();
    let refreshes = Arc::clone(&refresh_hits);
    let api = profile_route(Arc::clone(&profile_hits)).route(
        "/auth/refresh",
        post(move |Json(body): Json<Value>| {
            let hits = Arc::clone(&refreshes);
            async move {
                hits.hit(None);
                assert_eq!(body["refreshToken"], "r1");
                Json(json!({"token": "fresh", "refreshToken": "r2"}))
            }
        }),
    );
    let base = helpers::serve(api).await;
    let (store, client, services) = helpers::connect(&base);
    store.set_tokens("stale", Some("r1")).unwrap();
    let mut events = client.subscribe();

    let user = services.auth.profile().await.unwrap();

    assert_eq!(user.name, "Ada");
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(profile_hits.count(), 2);
    assert_eq!(refresh_hits.count(), 1);
    assert_eq!(store.token().unwrap().as_deref(), Some("fresh"));
    assert_eq!(store.refresh_token().unwrap().as_deref(), Some("r2"));
    assert_eq!(events.try_recv().unwrap(), AuthEvent::TokenRefreshed);
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let profile_hits = Recorder::new();
    let api = profile_route(Arc::clone(&profile_hits)).route(
        "/auth/refresh",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Refresh token revoked"}))) }),
    );
    let base = helpers::serve(api).await;
    let (store, client, services) = helpers::connect(&base);
    store.set_tokens("stale", Some("revoked")).unwrap();
    let mut events = client.subscribe();

    let err = services.auth.profile().await.unwrap_err();

    assert_eq!(err.status, 401);
    assert_eq!(profile_hits.count(), 1);
    assert!(store.token().unwrap().is_none());
    assert!(store.refresh_token().unwrap().is_none());
    assert_eq!(
        events.try_recv().unwrap(),
        AuthEvent::SessionExpired {
            redirect_to: "/login".to_string()
        }
    );
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let hits = Recorder::new();
    let counter = Arc::clone(&hits);
    let api = Router::new().route(
        "/health",
        get(move || {
            let hits = Arc::clone(&counter);
            async move {
                if hits.hit(None) < 3 {
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"message": "warming up"})))
                } else {
                    (
                        StatusCode::OK,
                        Json(json!({"status": "ok", "service": "portfolio-api", "timestamp": "2026-10-16T08:00:00Z"})),
                    )
                }
            }
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let health = services.health.health().await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(hits.count(), 3);
}

#[tokio::test]
async fn test_exhausted_retries_surface_server_error() {
    let hits = Recorder::new();
    let counter = Arc::clone(&hits);
    let api = Router::new().route(
        "/health",
        get(move || {
            let hits = Arc::clone(&counter);
            async move {
                hits.hit(None);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let err = services.health.health().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(err.user_message(), "Server error. Please try again later.");
    // One attempt plus max_retries (2).
    assert_eq!(hits.count(), 3);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let hits = Recorder::new();
    let counter = Arc::clone(&hits);
    let api = Router::new().route(
        "/projects/slug/{slug}",
        get(move || {
            let hits = Arc::clone(&counter);
            async move {
                hits.hit(None);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"message": "Slug is malformed", "errors": {"slug": "invalid"}})),
                )
            }
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let err = services.projects.get_by_slug("Bad Slug").await.unwrap_err();

    assert_eq!(err.status, 422);
    assert_eq!(err.kind, ErrorKind::Client);
    assert_eq!(err.message, "Slug is malformed");
    assert_eq!(err.data.as_ref().unwrap()["errors"]["slug"], "invalid");
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = Arc::new(folio_auth::MemorySessionStore::new());
    let config = ApiConfig {
        max_retries: 0,
        ..helpers::api_config(&format!("http://{addr}/api/v1"))
    };
    let client = Arc::new(folio_client::ApiClient::new(config, store).unwrap());
    let services = folio_client::Services::new(client);

    let err = services.health.health().await.unwrap_err();

    assert_eq!(err.status, 0);
    assert!(err.is_network_error());
    assert_eq!(err.user_message(), NO_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let api = Router::new().route(
        "/contact/stats",
        get(|headers: HeaderMap| async move {
            assert_eq!(bearer(&headers).as_deref(), Some("t1"));
            Json(json!({"total": 4, "unread": 1, "read": 1, "replied": 1, "archived": 1, "thisWeek": 2, "thisMonth": 4}))
        }),
    );
    let base = helpers::serve(api).await;
    let (store, _, services) = helpers::connect(&base);
    store.set_tokens("t1", None).unwrap();

    let stats = services.contact.stats().await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.this_week, 2);
}

#[tokio::test]
async fn test_skills_accepts_wrapped_shapes() {
    let api = Router::new().route(
        "/skills",
        get(|| async {
            Json(json!({"skills": [
                helpers::skill_json("s1", "Rust", "Languages"),
                helpers::skill_json("s2", "Tokio", "Libraries"),
            ]}))
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let skills = services.skills.list().await.unwrap();
    let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Rust", "Tokio"]);
}

#[tokio::test]
async fn test_project_list_accepts_page_and_array() {
    let api = Router::new()
        .route(
            "/projects",
            get(|Query(q): Query<Vec<(String, String)>>| async move {
                if q.iter().any(|(k, _)| k == "featured") {
                    Json(json!([helpers::project_json("p2", "beta", "Beta")]))
                } else {
                    Json(json!({
                        "projects": [helpers::project_json("p1", "alpha", "Alpha")],
                        "total": 11, "page": 1, "limit": 10, "totalPages": 2
                    }))
                }
            }),
        );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    let page = services.projects.list(&ProjectFilters::default()).await.unwrap();
    assert_eq!(page.items[0].slug, "alpha");
    assert_eq!(page.total_pages, 2);
    assert!(page.has_next());

    let featured = ProjectFilters {
        featured: Some(true),
        ..Default::default()
    };
    let page = services.projects.list(&featured).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].slug, "beta");
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_missing_status_is_none() {
    let api = Router::new().route(
        "/status/current",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "No status"}))) }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);

    assert!(services.status.current().await.unwrap().is_none());
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let api = Router::new().route(
        "/files/resume.pdf",
        get(|| async { (StatusCode::OK, b"%PDF-1.7 raw".to_vec()) }),
    );
    let base = helpers::serve(api).await;
    let (_, client, _) = helpers::connect(&base);

    let bytes = client.download("/files/resume.pdf").await.unwrap();
    assert_eq!(bytes, b"%PDF-1.7 raw");
}

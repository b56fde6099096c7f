//! Public site routes rendered against a mock backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::watch;
use tower::ServiceExt;

use folio::site::{SiteState, build_router};
use folio_core::config::AppConfig;
use folio_entity::status::StatusCategory;
use folio_service::status::StatusView;

use crate::helpers;

fn badge() -> StatusView {
    StatusView {
        emoji: "📅".to_string(),
        message: "Currently in a meeting".to_string(),
        category: StatusCategory::Busy,
        time_ago: "5m ago".to_string(),
        last_updated: "16 Oct 2026, 01:35 PM IST".to_string(),
    }
}

fn portfolio_api() -> Router {
    catalog_api().route("/auth/profile", get(|| async { Json(helpers::personal_json()) }))
}

/// Skills and projects without a profile route.
fn catalog_api() -> Router {
    Router::new()
        .route(
            "/skills",
            get(|| async {
                Json(json!({"data": [
                    helpers::skill_json("s1", "Rust", "Languages"),
                    helpers::skill_json("s2", "PostgreSQL", "Databases"),
                ]}))
            }),
        )
        .route(
            "/projects",
            get(|| async { Json(json!([helpers::project_json("p1", "folio", "Folio <Site>")])) }),
        )
        .route(
            "/projects/slug/{slug}",
            get(|axum::extract::Path(slug): axum::extract::Path<String>| async move {
                if slug == "folio" {
                    (StatusCode::OK, Json(helpers::project_json("p1", "folio", "Folio <Site>")))
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"message": "Project not found"})))
                }
            }),
        )
}

async fn site(api: Router, status: Option<StatusView>) -> Router {
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let (_tx, rx) = watch::channel(status);
    build_router(SiteState::new(Arc::new(AppConfig::default()), services, rx))
}

async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_renders_profile_skills_and_projects() {
    let app = site(portfolio_api(), Some(badge())).await;

    let (status, html) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Ada Lovelace</h1>"));
    assert!(html.contains("status-busy"));
    assert!(html.contains("Currently in a meeting"));
    assert!(html.contains("Databases"));
    assert!(html.contains("PostgreSQL"));
    assert!(html.contains("Folio &lt;Site&gt;"));
    assert!(html.contains("+1 more"));
}

#[tokio::test]
async fn test_index_without_status_has_no_badge() {
    let app = site(portfolio_api(), None).await;

    let (status, html) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("status-busy"));
}

#[tokio::test]
async fn test_index_degrades_missing_sections() {
    let api = Router::new()
        .route("/auth/profile", get(|| async { Json(helpers::personal_json()) }))
        .route("/skills", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/projects", get(|| async { StatusCode::FORBIDDEN }));
    let app = site(api, None).await;

    let (status, html) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Ada Lovelace"));
    assert!(!html.contains("View Details"));
}

#[tokio::test]
async fn test_index_falls_back_when_profile_is_refused() {
    let api = catalog_api().route(
        "/auth/profile",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Authentication required"}))) }),
    );
    let app = site(api, None).await;

    let (status, html) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Portfolio</h1>"));
    assert!(html.contains("Welcome to my portfolio"));
    assert!(html.contains("PostgreSQL"));
    assert!(html.contains("Folio &lt;Site&gt;"));
}

#[tokio::test]
async fn test_project_page() {
    let app = site(portfolio_api(), None).await;

    let (status, html) = get_page(app, "/project/folio").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Back to Portfolio"));
    assert!(html.contains("Live status"));
    assert!(html.contains("Source Code"));
}

#[tokio::test]
async fn test_unknown_project_is_404() {
    let app = site(portfolio_api(), None).await;

    let (status, html) = get_page(app, "/project/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("404"));
}

#[tokio::test]
async fn test_status_endpoint_serves_badge() {
    let app = site(Router::new(), Some(badge())).await;

    let (status, body) = get_page(app, "/status").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["emoji"], "📅");
    assert_eq!(json["category"], "busy");

    let app = site(Router::new(), None).await;
    let (_, body) = get_page(app, "/status").await;
    assert_eq!(body, "null");
}

#[tokio::test]
async fn test_health() {
    let app = site(Router::new(), None).await;

    let (status, body) = get_page(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

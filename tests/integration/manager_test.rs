//! List managers and their actions over HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, RawQuery};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde_json::json;

use folio_entity::contact::ContactStatus;
use folio_entity::skill::{CreateSkillRequest, SkillLevel};
use folio_service::ResourceManager;
use folio_service::contact::{ContactActions, ContactsFetcher};
use folio_service::projects::{ProjectActions, ProjectsFetcher};
use folio_service::skills::{SkillActions, SkillsFetcher};

use crate::helpers::{self, Recorder};

const DEBOUNCE: Duration = Duration::from_millis(80);

fn projects_api(list: Arc<Recorder>) -> Router {
    Router::new().route(
        "/projects",
        get(move |RawQuery(query): RawQuery| {
            let list = Arc::clone(&list);
            async move {
                list.hit(Some(query.unwrap_or_default()));
                Json(json!([
                    helpers::project_json("p1", "alpha", "Alpha"),
                    helpers::project_json("p2", "beta", "Beta"),
                ]))
            }
        }),
    )
}

#[tokio::test]
async fn test_filters_before_mount_do_not_fetch() {
    let list = Recorder::new();
    let base = helpers::serve(projects_api(Arc::clone(&list))).await;
    let (_, _, services) = helpers::connect(&base);
    let manager =
        ResourceManager::with_debounce(ProjectsFetcher::new(services.projects.clone()), DEBOUNCE);

    manager.update_filters(|f| f.search_term = "rust".to_string());
    tokio::time::sleep(DEBOUNCE * 3).await;
    assert_eq!(list.count(), 0);

    manager.mount().await;
    assert_eq!(list.count(), 1);
    assert_eq!(list.queries(), ["search=rust"]);
    assert_eq!(manager.items().len(), 2);
}

#[tokio::test]
async fn test_rapid_filter_changes_fetch_once() {
    let list = Recorder::new();
    let base = helpers::serve(projects_api(Arc::clone(&list))).await;
    let (_, _, services) = helpers::connect(&base);
    let manager =
        ResourceManager::with_debounce(ProjectsFetcher::new(services.projects.clone()), DEBOUNCE);

    manager.mount().await;
    assert_eq!(list.count(), 1);

    manager.update_filters(|f| f.search_term = "foo".to_string());
    manager.update_filters(|f| f.search_term = "foobar".to_string());
    tokio::time::sleep(DEBOUNCE * 5).await;

    assert_eq!(list.count(), 2);
    assert_eq!(list.queries(), ["", "search=foobar"]);
    assert_eq!(manager.filters().search_term, "foobar");
    assert!(!manager.snapshot().loading);
}

#[tokio::test]
async fn test_failed_list_sets_page_error() {
    let api = Router::new().route(
        "/projects",
        get(|| async { (StatusCode::BAD_REQUEST, Json(json!({"message": "bad filter"}))) }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = ResourceManager::new(ProjectsFetcher::new(services.projects.clone()));

    manager.mount().await;

    let state = manager.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to load projects"));
    assert!(state.items.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_project_delete_reloads_list() {
    let list = Recorder::new();
    let api = projects_api(Arc::clone(&list)).route(
        "/projects/{id}",
        delete(|Path(id): Path<String>| async move {
            assert_eq!(id, "p1");
            Json(json!({"message": "Project deleted"}))
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = Arc::new(ResourceManager::new(ProjectsFetcher::new(
        services.projects.clone(),
    )));
    manager.mount().await;
    let project = manager.items().remove(0);

    let actions = ProjectActions::new(services.projects.clone(), Arc::clone(&manager));
    actions.delete(&project).await.unwrap();

    assert_eq!(list.count(), 2);
}

fn contacts_api(list: Arc<Recorder>, stats: Arc<Recorder>, marks: Arc<Recorder>) -> Router {
    Router::new()
        .route(
            "/contact/messages",
            get(move |RawQuery(query): RawQuery| {
                let list = Arc::clone(&list);
                async move {
                    list.hit(query);
                    Json(json!({
                        "messages": [helpers::contact_json("c1", "UNREAD"), helpers::contact_json("c2", "READ")],
                        "total": 2, "page": 1, "limit": 50, "totalPages": 1
                    }))
                }
            }),
        )
        .route(
            "/contact/stats",
            get(move || {
                let stats = Arc::clone(&stats);
                async move {
                    stats.hit(None);
                    Json(json!({"total": 2, "unread": 1, "read": 1, "replied": 0, "archived": 0, "thisWeek": 2, "thisMonth": 2}))
                }
            }),
        )
        .route(
            "/contact/messages/{id}/read",
            put(move |Path(id): Path<String>| {
                let marks = Arc::clone(&marks);
                async move {
                    marks.hit(Some(id.clone()));
                    Json(helpers::contact_json(&id, "READ"))
                }
            }),
        )
}

#[tokio::test]
async fn test_contacts_mount_loads_list_and_stats() {
    let (list, stats, marks) = (Recorder::new(), Recorder::new(), Recorder::new());
    let api = contacts_api(Arc::clone(&list), Arc::clone(&stats), marks);
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = ResourceManager::new(ContactsFetcher::new(services.contact.clone()));

    manager.mount().await;

    let state = manager.snapshot();
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.stats.unwrap().unread, 1);
    assert_eq!((list.count(), stats.count()), (1, 1));
    let query = &list.queries()[0];
    assert!(query.contains("sortBy=createdAt"), "{query}");
    assert!(query.contains("sortOrder=desc"), "{query}");
}

#[tokio::test]
async fn test_viewing_unread_message_marks_it_read() {
    let (list, stats, marks) = (Recorder::new(), Recorder::new(), Recorder::new());
    let api = contacts_api(Arc::clone(&list), Arc::clone(&stats), Arc::clone(&marks));
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = Arc::new(ResourceManager::new(ContactsFetcher::new(
        services.contact.clone(),
    )));
    manager.mount().await;
    let actions = ContactActions::new(services.contact.clone(), Arc::clone(&manager));

    let items = manager.items();
    let unread = items.iter().find(|c| c.status == ContactStatus::Unread).unwrap();
    let read = items.iter().find(|c| c.status == ContactStatus::Read).unwrap();

    actions.view(read).await.unwrap();
    assert_eq!(marks.count(), 0);

    actions.view(unread).await.unwrap();
    assert_eq!(marks.queries(), ["c1"]);
    // Mount plus one reload after the transition.
    assert_eq!((list.count(), stats.count()), (2, 2));
}

#[tokio::test]
async fn test_failed_contact_action_keeps_list() {
    let (list, stats, marks) = (Recorder::new(), Recorder::new(), Recorder::new());
    let api = contacts_api(Arc::clone(&list), Arc::clone(&stats), marks).route(
        "/contact/messages/{id}/archive",
        put(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "Message not found"}))) }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = Arc::new(ResourceManager::new(ContactsFetcher::new(
        services.contact.clone(),
    )));
    manager.mount().await;
    let actions = ContactActions::new(services.contact.clone(), Arc::clone(&manager));

    let err = actions.archive("c404").await.unwrap_err();

    assert_eq!(err.status, 404);
    assert_eq!(list.count(), 1);
    assert_eq!(manager.items().len(), 2);
}

#[tokio::test]
async fn test_skill_actions_splice_results() {
    let api = Router::new()
        .route(
            "/skills",
            get(|| async {
                Json(json!([
                    helpers::skill_json("s1", "Rust", "Languages"),
                    helpers::skill_json("s2", "Go", "Languages"),
                ]))
            })
            .post(|Json(body): Json<serde_json::Value>| async move {
                Json(json!({
                    "id": "s3",
                    "name": body["name"],
                    "category": body["category"],
                    "level": body["level"]
                }))
            }),
        )
        .route(
            "/skills/{id}",
            delete(|Path(id): Path<String>| async move {
                if id == "s2" {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::FORBIDDEN
                }
            }),
        );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = Arc::new(ResourceManager::new(SkillsFetcher::new(
        services.skills.clone(),
    )));
    manager.mount().await;
    let actions = SkillActions::new(services.skills.clone(), Arc::clone(&manager));

    let created = actions
        .create(&CreateSkillRequest {
            name: "Tokio".to_string(),
            category: "Libraries".to_string(),
            level: SkillLevel::Advanced,
            icon: None,
            description: None,
            years_of_experience: Some(3),
            featured: None,
        })
        .await
        .unwrap();
    assert_eq!(created.level, SkillLevel::Advanced);

    assert!(actions.delete("s2").await);
    assert!(!actions.delete("s1").await);

    let state = manager.snapshot();
    let names: Vec<_> = state.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Rust", "Tokio"]);
    assert_eq!(state.error.as_deref(), Some("Failed to delete skill"));
}

#[tokio::test]
async fn test_created_skill_respects_filters_and_order() {
    let api = Router::new().route(
        "/skills",
        get(|| async {
            Json(json!([
                helpers::skill_json("s1", "Rust", "Languages"),
                helpers::skill_json("s2", "Go", "Languages"),
            ]))
        })
        .post(|Json(body): Json<serde_json::Value>| async move {
            Json(json!({
                "id": format!("new-{}", body["name"].as_str().unwrap_or_default()),
                "name": body["name"],
                "category": body["category"],
                "level": body["level"]
            }))
        }),
    );
    let base = helpers::serve(api).await;
    let (_, _, services) = helpers::connect(&base);
    let manager = Arc::new(ResourceManager::new(SkillsFetcher::new(
        services.skills.clone(),
    )));
    manager.update_filters(|f| f.search_term = "r".to_string());
    manager.mount().await;
    let actions = SkillActions::new(services.skills.clone(), Arc::clone(&manager));

    let request = |name: &str, category: &str| CreateSkillRequest {
        name: name.to_string(),
        category: category.to_string(),
        level: SkillLevel::Intermediate,
        icon: None,
        description: None,
        years_of_experience: None,
        featured: None,
    };
    // Matches the search and sorts ahead of "Rust".
    assert!(actions.create(&request("Actix", "Frameworks")).await.is_some());
    // Saved but filtered out of the visible list.
    assert!(actions.create(&request("Tokio", "Async")).await.is_some());

    let names: Vec<_> = manager.items().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Actix", "Rust"]);
}

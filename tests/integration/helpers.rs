//! Shared test helpers: an in-process mock backend and fixture records.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use serde_json::{Value, json};

use folio_auth::MemorySessionStore;
use folio_client::{ApiClient, Services};
use folio_core::config::ApiConfig;

/// Serve `api` under `/api/v1` on an ephemeral port and return the base
/// URL to point a client at.
pub async fn serve(api: Router) -> String {
    let app = Router::new().nest("/api/v1", api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });
    format!("http://{addr}/api/v1")
}

/// Client config with short retry delays.
pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
        max_retries: 2,
        retry_delay_ms: 10,
    }
}

/// Client and services over a fresh in-memory session store.
pub fn connect(base_url: &str) -> (Arc<MemorySessionStore>, Arc<ApiClient>, Services) {
    let store = Arc::new(MemorySessionStore::new());
    let client = Arc::new(
        ApiClient::new(api_config(base_url), store.clone()).expect("valid client config"),
    );
    let services = Services::new(Arc::clone(&client));
    (store, client, services)
}

/// Counts requests and remembers their query strings.
#[derive(Debug, Default)]
pub struct Recorder {
    hits: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record one request and return its 1-based number.
    pub fn hit(&self, query: Option<String>) -> usize {
        if let Some(q) = query {
            self.queries.lock().unwrap().push(q);
        }
        self.hits.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

pub fn project_json(id: &str, slug: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "A project used by the integration tests",
        "technologies": ["Rust", "Tokio", "axum", "serde"],
        "features": ["Live status", "Admin console"],
        "githubUrl": "https://github.com/example/folio",
        "slug": slug,
        "category": "web",
        "featured": true,
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-02T00:00:00Z"
    })
}

pub fn skill_json(id: &str, name: &str, category: &str) -> Value {
    json!({"id": id, "name": name, "category": category, "level": "EXPERT"})
}

pub fn contact_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "subject": "Hello",
        "message": "I would like to talk about a project.",
        "status": status,
        "createdAt": "2026-10-15T10:00:00Z",
        "updatedAt": "2026-10-15T10:00:00Z"
    })
}

pub fn user_status_json(id: &str, emoji: &str, message: &str) -> Value {
    json!({
        "id": id,
        "emoji": emoji,
        "message": message,
        "isActive": true,
        "createdAt": "2026-10-16T08:00:00Z",
        "updatedAt": "2026-10-16T08:00:00Z"
    })
}

pub fn personal_json() -> Value {
    json!({
        "name": "Ada Lovelace",
        "title": "Software Engineer",
        "description": "Builds reliable systems.",
        "email": "ada@example.com",
        "location": "London",
        "socialLinks": [{"name": "GitHub", "url": "https://github.com/ada"}]
    })
}

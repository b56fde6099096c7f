//! REST API client for the portfolio backend.
//!
//! Every request goes through [`ApiClient::execute`], which layers three
//! behaviours on top of a plain [`reqwest::Client`]:
//!
//! 1. the bearer token from the injected [`SessionStore`] is attached;
//! 2. a `401` triggers exactly one token refresh followed by a single
//!    replay of the original request;
//! 3. network failures, timeouts and `5xx` responses are retried up to
//!    `max_retries` times with a fixed delay. `4xx` is never retried.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, warn};

use folio_core::AppResult;
use folio_core::config::ApiConfig;
use folio_core::error::{AppError, ErrorKind, NO_RESPONSE_MESSAGE};
use folio_core::traits::SessionStore;
use folio_core::types::QueryParams;
use folio_entity::user::TokenPair;

use crate::endpoints;

/// Capacity of the auth event channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Default route published when a session cannot be recovered.
const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Session lifecycle notifications published by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A `401` was recovered by refreshing the access token.
    TokenRefreshed,
    /// The refresh failed; stored credentials were cleared and the user
    /// should be sent to `redirect_to`.
    SessionExpired { redirect_to: String },
}

/// One logical request, replayable across retries and the refresh path.
struct RequestSpec<'a> {
    method: Method,
    path: &'a str,
    query: Option<&'a QueryParams>,
    body: Option<serde_json::Value>,
}

/// HTTP client bound to one backend base URL and one session store.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    config: ApiConfig,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<AuthEvent>,
    /// Serializes refreshes so concurrent 401s trigger a single refresh.
    refresh_lock: Mutex<()>,
    login_route: String,
}

impl ApiClient {
    /// Build a client from configuration and a session store.
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "API base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            http,
            base_url,
            config,
            store,
            events,
            refresh_lock: Mutex::new(()),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
        })
    }

    /// Override the route published with [`AuthEvent::SessionExpired`].
    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// The session store this client reads credentials from.
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request(Method::GET, path, None, None).await
    }

    /// `GET path?query`.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> AppResult<T> {
        self.request(Method::GET, path, Some(query), None).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, None, Some(body)).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, None, Some(body)).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, path, None, Some(body)).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request(Method::DELETE, path, None, None).await
    }

    /// `GET path` returning the raw body without JSON decoding.
    pub async fn download(&self, path: &str) -> AppResult<Vec<u8>> {
        let spec = RequestSpec {
            method: Method::GET,
            path,
            query: None,
            body: None,
        };
        self.execute(&spec).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<serde_json::Value>,
    ) -> AppResult<T> {
        let spec = RequestSpec {
            method,
            path,
            query,
            body,
        };
        let bytes = self.execute(&spec).await?;
        decode_body(&bytes)
    }

    /// Run a request with the refresh path and transient retry applied.
    async fn execute(&self, spec: &RequestSpec<'_>) -> AppResult<Vec<u8>> {
        let mut attempt: u32 = 1;
        loop {
            match self.send_with_refresh(spec, attempt).await {
                Ok(bytes) => return Ok(bytes),
                Err(err) if err.is_transient() && attempt <= self.config.max_retries => {
                    warn!(
                        method = %spec.method,
                        path = spec.path,
                        attempt,
                        status = err.status,
                        error = %err,
                        "API request failed, retrying"
                    );
                    attempt += 1;
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Send once; on `401` refresh the session and replay a single time.
    async fn send_with_refresh(&self, spec: &RequestSpec<'_>, attempt: u32) -> AppResult<Vec<u8>> {
        let token = self.store.token()?;
        let unauthorized = match self.send_once(spec, token.as_deref(), attempt).await {
            Err(err) if err.status == StatusCode::UNAUTHORIZED.as_u16() => err,
            other => return other,
        };

        let replay_token = {
            let _guard = self.refresh_lock.lock().await;
            let current = self.store.token()?;
            if current.is_some() && current != token {
                // Another request refreshed while this one waited.
                current
            } else {
                match self.refresh_session().await {
                    Ok(()) => self.store.token()?,
                    Err(refresh_err) => {
                        self.expire_session(&refresh_err);
                        return Err(unauthorized);
                    }
                }
            }
        };

        debug!(method = %spec.method, path = spec.path, "Replaying request after token refresh");
        self.send_once(spec, replay_token.as_deref(), attempt).await
    }

    async fn send_once(
        &self,
        spec: &RequestSpec<'_>,
        token: Option<&str>,
        attempt: u32,
    ) -> AppResult<Vec<u8>> {
        let url = self.build_url(spec.path, spec.query)?;
        let mut builder = self
            .http
            .request(spec.method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(
            method = %spec.method,
            path = spec.path,
            status = status.as_u16(),
            attempt,
            "API request completed"
        );

        if status.is_success() {
            return response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(map_transport_error);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(http_error(status, &body))
    }

    async fn refresh_session(&self) -> AppResult<()> {
        let refresh_token = self
            .store
            .refresh_token()?
            .ok_or_else(|| AppError::authentication("No refresh token available"))?;

        let url = self.build_url(endpoints::auth::REFRESH, None)?;
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::authentication(format!(
                "Token refresh failed with status {}",
                response.status().as_u16()
            )));
        }

        let pair: TokenPair = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Authentication,
                "Token refresh returned an invalid body",
                e,
            )
        })?;
        self.store
            .set_tokens(&pair.token, pair.refresh_token.as_deref())?;

        info!("Access token refreshed");
        let _ = self.events.send(AuthEvent::TokenRefreshed);
        Ok(())
    }

    fn expire_session(&self, cause: &AppError) {
        error!(error = %cause, "Token refresh failed, clearing stored session");
        if let Err(e) = self.store.clear_auth() {
            warn!(error = %e, "Failed to clear session store");
        }
        let _ = self.events.send(AuthEvent::SessionExpired {
            redirect_to: self.login_route.clone(),
        });
    }

    /// Join `path` onto the base URL, encoding each segment, and append
    /// the query string.
    fn build_url(&self, path: &str, query: Option<&QueryParams>) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AppError::configuration(format!(
                    "API base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

/// Map a transport-level failure (no HTTP response) onto [`AppError`].
pub fn map_transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::with_source(
            ErrorKind::Timeout,
            "Request timeout: the server did not respond in time",
            err,
        )
    } else if err.is_builder() {
        AppError::with_source(ErrorKind::Internal, format!("Invalid request: {err}"), err)
    } else {
        AppError::with_source(ErrorKind::Network, NO_RESPONSE_MESSAGE, err)
    }
}

/// Build the error for a non-2xx response.
///
/// The message is the body's `message` field when present, otherwise the
/// status reason phrase.
fn http_error(status: StatusCode, body: &[u8]) -> AppError {
    let data = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .or_else(|| {
            (!body.is_empty())
                .then(|| serde_json::Value::String(String::from_utf8_lossy(body).into_owned()))
        });

    let message = data
        .as_ref()
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    AppError::http(status.as_u16(), message, data)
}

/// Decode a JSON body. An empty body decodes as `null`, so `()` and
/// `Option<T>` targets accept `204`-style responses.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> AppResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    use folio_core::traits::StorageScope;

    #[derive(Debug, Default)]
    struct TestStore(StdMutex<HashMap<String, String>>);

    impl SessionStore for TestStore {
        fn get(&self, _scope: StorageScope, key: &str) -> AppResult<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        fn set(&self, _scope: StorageScope, key: &str, value: &str) -> AppResult<()> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, _scope: StorageScope, key: &str) -> AppResult<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ApiConfig::with_base_url(base), Arc::new(TestStore::default())).unwrap()
    }

    #[test]
    fn test_build_url_joins_and_encodes() {
        let client = client("http://localhost:8080/api/v1");
        let url = client
            .build_url(&endpoints::projects::by_category("Web Development"), None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/projects/category/Web%20Development"
        );

        let query = QueryParams::new().push("q", "rust & wasm").push("page", 2);
        let url = client.build_url(endpoints::projects::SEARCH, Some(&query)).unwrap();
        assert_eq!(url.path(), "/api/v1/projects/search");
        assert_eq!(url.query(), Some("q=rust+%26+wasm&page=2"));
    }

    #[test]
    fn test_build_url_with_trailing_slash_base() {
        let client = client("http://localhost:8080/api/v1/");
        let url = client.build_url("/health", Some(&QueryParams::new())).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/health");
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = ApiClient::new(
            ApiConfig::with_base_url("not a url"),
            Arc::new(TestStore::default()),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_http_error_prefers_body_message() {
        let err = http_error(
            StatusCode::CONFLICT,
            br#"{"message":"Slug already taken","field":"slug"}"#,
        );
        assert_eq!(err.status, 409);
        assert_eq!(err.message, "Slug already taken");
        assert_eq!(err.data.unwrap()["field"], "slug");

        let err = http_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(err.message, "Bad Gateway");
        assert!(err.data.is_none());
        assert!(err.is_server_error());

        let err = http_error(StatusCode::NOT_FOUND, b"nothing here");
        assert_eq!(err.message, "Not Found");
        assert_eq!(err.data.unwrap(), "nothing here");
    }

    #[test]
    fn test_decode_empty_body() {
        decode_body::<()>(b"").unwrap();
        let none: Option<u32> = decode_body(b"  ").unwrap();
        assert!(none.is_none());
        let value: Vec<u32> = decode_body(b"[1,2]").unwrap();
        assert_eq!(value, vec![1, 2]);
        assert!(decode_body::<Vec<u32>>(b"").is_err());
    }
}

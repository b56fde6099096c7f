//! OAuth callback handling.
//!
//! The backend finishes the Google round trip by redirecting to the
//! callback route with `token`, `refreshToken`, `user` and `error` query
//! parameters. [`handle_callback`] persists what it receives and decides
//! where to go next.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

use folio_core::AppResult;
use folio_core::config::AuthConfig;
use folio_core::error::AppError;
use folio_core::traits::{SessionStore, StorageScope, keys};
use folio_entity::user::{User, UserRole};

use crate::session_id::session_id;

/// Delay before leaving the callback page after success.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Delay before returning to the login page after a failure.
pub const FAILURE_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Query parameters delivered to the callback route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackParams {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    /// URL-decoded user JSON, or a plain display name.
    pub user: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Parse a raw query string (with or without the leading `?`).
    pub fn from_query(query: &str) -> AppResult<Self> {
        let url = Url::parse(&format!("http://callback/?{}", query.trim_start_matches('?')))
            .map_err(|e| AppError::validation(format!("Invalid callback query: {e}")))?;
        Ok(Self::from_pairs(url.query_pairs()))
    }

    /// Parse the query of a full callback URL.
    pub fn from_url(url: &str) -> AppResult<Self> {
        let url = Url::parse(url)
            .map_err(|e| AppError::validation(format!("Invalid callback URL: {e}")))?;
        Ok(Self::from_pairs(url.query_pairs()))
    }

    fn from_pairs<'a>(
        pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    ) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = Some(value.into_owned()).filter(|v| !v.is_empty());
            match key.as_ref() {
                "token" => params.token = value,
                "refreshToken" => params.refresh_token = value,
                "user" => params.user = value,
                "error" => params.error = value,
                _ => {}
            }
        }
        params
    }
}

/// What the callback page should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Signed in; go to `to` after `after`.
    Redirect { to: String, after: Duration },
    /// Sign-in failed; show `message` then go to `redirect_to` after `after`.
    Failed {
        message: String,
        redirect_to: String,
        after: Duration,
    },
}

/// Partially specified user as the backend may send it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallbackUser {
    name: String,
    #[serde(default)]
    email: String,
    role: Option<UserRole>,
    email_verified: Option<bool>,
}

/// Interpret the `user` parameter. JSON is used as-is with `role`
/// defaulting to admin and `emailVerified` to true; anything else is
/// taken as a display name.
pub fn parse_callback_user(raw: &str) -> User {
    match serde_json::from_str::<CallbackUser>(raw) {
        Ok(u) => User {
            name: u.name,
            email: u.email,
            role: u.role.unwrap_or(UserRole::Admin),
            email_verified: u.email_verified.unwrap_or(true),
        },
        Err(_) => User {
            name: raw.to_string(),
            email: String::new(),
            role: UserRole::Admin,
            email_verified: true,
        },
    }
}

/// Persist the callback result and decide where to go next.
///
/// The stored `redirectAfterAuth` location is consumed on success, and a
/// session id is established if none exists yet.
pub fn handle_callback(
    store: &dyn SessionStore,
    params: &CallbackParams,
    config: &AuthConfig,
) -> AppResult<CallbackOutcome> {
    let fail = |message: String| CallbackOutcome::Failed {
        message,
        redirect_to: config.login_route.clone(),
        after: FAILURE_REDIRECT_DELAY,
    };

    if let Some(error) = &params.error {
        warn!(error = %error, "OAuth callback reported an error");
        return Ok(fail(format!("Authentication failed: {error}")));
    }

    let Some(token) = &params.token else {
        warn!("OAuth callback carried no token");
        return Ok(fail("No authentication token received".to_string()));
    };

    store.set_tokens(token, params.refresh_token.as_deref())?;

    if let Some(raw) = &params.user {
        let user = parse_callback_user(raw);
        store.set(
            StorageScope::Persistent,
            keys::USER,
            &serde_json::to_string(&user)?,
        )?;
        info!(name = %user.name, role = %user.role, "Signed in");
    }

    let to = store
        .get(StorageScope::Session, keys::REDIRECT_AFTER_AUTH)?
        .unwrap_or_else(|| config.default_redirect.clone());
    store.remove(StorageScope::Session, keys::REDIRECT_AFTER_AUTH)?;
    let session = session_id(store)?;
    debug!(session = %session, "Session established");

    Ok(CallbackOutcome::Redirect {
        to,
        after: SUCCESS_REDIRECT_DELAY,
    })
}

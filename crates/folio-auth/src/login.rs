//! Login URL builders.

use reqwest::Url;

use folio_core::AppResult;
use folio_core::config::AuthConfig;
use folio_core::error::AppError;
use folio_core::traits::{SessionStore, StorageScope, keys};

/// Google's OAuth 2.0 authorization endpoint.
pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Scopes requested from Google.
pub const GOOGLE_SCOPES: [&str; 3] = ["openid", "profile", "email"];

/// URL of the backend's Google login endpoint.
///
/// Records where the callback should send the user afterwards.
pub fn backend_login_url(store: &dyn SessionStore, config: &AuthConfig) -> AppResult<String> {
    store.set(
        StorageScope::Session,
        keys::REDIRECT_AFTER_AUTH,
        &config.default_redirect,
    )?;
    Ok(format!(
        "{}{}",
        config.api_url.trim_end_matches('/'),
        config.google_auth_path
    ))
}

/// Direct Google authorization URL for the configured client.
pub fn google_oauth_url(config: &AuthConfig) -> AppResult<String> {
    if config.google_client_id.is_empty() {
        return Err(AppError::configuration("auth.google_client_id is not set"));
    }
    let mut url = Url::parse(GOOGLE_AUTHORIZE_URL)
        .map_err(|e| AppError::internal(format!("Invalid authorize URL: {e}")))?;
    url.query_pairs_mut()
        .append_pair("client_id", &config.google_client_id)
        .append_pair("redirect_uri", &config.google_redirect_uri)
        .append_pair("scope", &GOOGLE_SCOPES.join(" "))
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;

    #[test]
    fn test_backend_login_records_redirect() {
        let store = MemorySessionStore::new();
        let url = backend_login_url(&store, &AuthConfig::default()).unwrap();
        assert_eq!(url, "http://localhost:8080/api/v1/auth/google");
        assert_eq!(
            store
                .get(StorageScope::Session, keys::REDIRECT_AFTER_AUTH)
                .unwrap()
                .as_deref(),
            Some("/admin")
        );
    }

    #[test]
    fn test_google_oauth_url() {
        let config = AuthConfig {
            google_client_id: "client-123".into(),
            google_redirect_uri: "http://localhost:3000/auth/callback".into(),
            ..AuthConfig::default()
        };
        let url = google_oauth_url(&config).unwrap();
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?client_id=client-123"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"));
        assert!(url.contains("scope=openid+profile+email"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
    }

    #[test]
    fn test_google_oauth_url_requires_client_id() {
        assert!(google_oauth_url(&AuthConfig::default()).is_err());
    }
}

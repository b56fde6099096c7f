//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// OAuth and session persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Origin of the backend API (without the `/api/v1` suffix).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Path of the backend Google login endpoint on `api_url`.
    #[serde(default = "default_google_auth_path")]
    pub google_auth_path: String,
    /// Route users are sent to when their session expires.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Route used after a successful login when nothing else was requested.
    #[serde(default = "default_redirect")]
    pub default_redirect: String,
    /// Directory holding the persisted session file.
    #[serde(default = "default_session_dir")]
    pub session_dir: String,
    /// Google OAuth client id.
    #[serde(default)]
    pub google_client_id: String,
    /// Google OAuth client secret.
    #[serde(default)]
    pub google_client_secret: String,
    /// Redirect URI registered with Google.
    #[serde(default = "default_google_redirect_uri")]
    pub google_redirect_uri: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            google_auth_path: default_google_auth_path(),
            login_route: default_login_route(),
            default_redirect: default_redirect(),
            session_dir: default_session_dir(),
            google_client_id: String::new(),
            google_client_secret: String::new(),
            google_redirect_uri: default_google_redirect_uri(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_google_auth_path() -> String {
    "/api/v1/auth/google".to_string()
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_redirect() -> String {
    "/admin".to_string()
}

fn default_session_dir() -> String {
    "data/session".to_string()
}

fn default_google_redirect_uri() -> String {
    "http://localhost:3000/auth/callback".to_string()
}

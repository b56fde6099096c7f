//! Session storage trait for pluggable credential backends.

use crate::result::AppResult;

/// Well-known storage keys.
pub mod keys {
    /// Access token (persistent).
    pub const TOKEN: &str = "jwt_token";
    /// Refresh token (persistent).
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Serialized user profile JSON (persistent).
    pub const USER: &str = "user_data";
    /// Where to send the user after the OAuth round trip (session-scoped).
    pub const REDIRECT_AFTER_AUTH: &str = "redirectAfterAuth";
    /// Per-process session identifier (session-scoped).
    pub const SESSION_ID: &str = "sessionId";

    /// Keys removed when the session is torn down.
    pub const AUTH_KEYS: [&str; 3] = [TOKEN, REFRESH_TOKEN, USER];
}

/// Lifetime of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Survives process restarts where the backend supports it.
    Persistent,
    /// Lives only as long as the current process.
    Session,
}

/// Trait for key/value credential storage.
///
/// The API client reads the bearer token through this trait on every
/// request and writes refreshed tokens back through it, so implementations
/// must be cheap to read and safe to share across tasks.
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value. Returns `None` if the key is not set.
    fn get(&self, scope: StorageScope, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    fn set(&self, scope: StorageScope, key: &str, value: &str) -> AppResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, scope: StorageScope, key: &str) -> AppResult<()>;

    /// Current access token.
    fn token(&self) -> AppResult<Option<String>> {
        self.get(StorageScope::Persistent, keys::TOKEN)
    }

    /// Current refresh token.
    fn refresh_token(&self) -> AppResult<Option<String>> {
        self.get(StorageScope::Persistent, keys::REFRESH_TOKEN)
    }

    /// Store a new token pair. A missing refresh token leaves the old one.
    fn set_tokens(&self, token: &str, refresh_token: Option<&str>) -> AppResult<()> {
        self.set(StorageScope::Persistent, keys::TOKEN, token)?;
        if let Some(refresh) = refresh_token {
            self.set(StorageScope::Persistent, keys::REFRESH_TOKEN, refresh)?;
        }
        Ok(())
    }

    /// Remove the token pair and the cached user.
    fn clear_auth(&self) -> AppResult<()> {
        for key in keys::AUTH_KEYS {
            self.remove(StorageScope::Persistent, key)?;
        }
        Ok(())
    }
}

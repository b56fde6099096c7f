//! Signed-in user queries.

use std::sync::Arc;

use tracing::{info, warn};

use folio_core::AppResult;
use folio_core::traits::{StorageScope, keys};
use folio_entity::user::User;

use crate::client::ApiClient;
use crate::endpoints::auth as ep;

/// Reads the current user from the backend and from session storage.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the signed-in user's profile from the backend.
    pub async fn profile(&self) -> AppResult<User> {
        self.client.get(ep::PROFILE).await
    }

    /// Whether an access token is stored.
    pub fn is_authenticated(&self) -> AppResult<bool> {
        Ok(self.client.session_store().token()?.is_some())
    }

    /// Whether the cached user has the admin role.
    pub fn is_admin(&self) -> AppResult<bool> {
        Ok(self.current_user()?.is_some_and(|u| u.is_admin()))
    }

    /// The cached user. Unparseable data is treated as absent.
    pub fn current_user(&self) -> AppResult<Option<User>> {
        let raw = self
            .client
            .session_store()
            .get(StorageScope::Persistent, keys::USER)?;
        Ok(raw.and_then(|data| match serde_json::from_str(&data) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user data is not valid JSON");
                None
            }
        }))
    }

    /// Remove the stored token pair and cached user.
    pub fn logout(&self) -> AppResult<()> {
        self.client.session_store().clear_auth()?;
        info!("Signed out");
        Ok(())
    }
}

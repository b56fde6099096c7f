//! Owner profile endpoints.

use std::sync::Arc;

use tracing::info;

use folio_core::AppResult;
use folio_entity::personal::{PersonalInfo, PersonalInfoUpdate};

use crate::client::ApiClient;
use crate::endpoints::auth as ep;

/// Typed access to the profile endpoint.
#[derive(Debug, Clone)]
pub struct PersonalService {
    client: Arc<ApiClient>,
}

impl PersonalService {
    /// Creates a new personal info service.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> AppResult<PersonalInfo> {
        self.client.get(ep::PROFILE).await
    }

    /// Sends only the fields set on `update`.
    pub async fn update(&self, update: &PersonalInfoUpdate) -> AppResult<PersonalInfo> {
        let info: PersonalInfo = self.client.put(ep::PROFILE, update).await?;
        info!(name = %info.name, "Profile updated");
        Ok(info)
    }
}

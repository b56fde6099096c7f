//! Health check and diagnostics endpoints.

use std::sync::Arc;

use tracing::info;

use folio_core::AppResult;
use folio_entity::system::{HealthCheck, TestEmailRequest, TestEmailResponse};

use crate::client::ApiClient;
use crate::endpoints::system as ep;

#[derive(Debug, Clone)]
pub struct HealthService {
    client: Arc<ApiClient>,
}

impl HealthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> AppResult<HealthCheck> {
        self.client.get(ep::HEALTH).await
    }

    pub async fn send_test_email(&self, req: &TestEmailRequest) -> AppResult<TestEmailResponse> {
        let resp: TestEmailResponse = self.client.post(ep::TEST_EMAIL, req).await?;
        info!(email = %resp.email, kind = %resp.kind, "Test email sent");
        Ok(resp)
    }
}

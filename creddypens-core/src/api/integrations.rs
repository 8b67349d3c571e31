//! Delivery integration endpoints (slack, email, webhook).

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::integration::IntegrationTestResult;
use crate::models::Integration;

impl ApiClient {
    /// `GET /v1/organizations/{org}/integrations`.
    pub async fn list_integrations(&self) -> CreddyResult<Vec<Integration>> {
        let org_id = self.org().require()?;
        self.get_org(&format!("/v1/organizations/{}/integrations", org_id))
            .await
    }

    /// `POST /v1/organizations/{org}/integrations` — create or replace an
    /// integration of the given type.
    pub async fn save_integration(
        &self,
        integration_type: &str,
        config: &serde_json::Value,
    ) -> CreddyResult<Integration> {
        let org_id = self.org().require()?;
        self.post_org(
            &format!("/v1/organizations/{}/integrations", org_id),
            &serde_json::json!({
                "integration_type": integration_type,
                "config": config,
                "is_active": true,
            }),
        )
        .await
    }

    /// `POST /v1/integrations/{id}/test` — fire a test delivery.
    pub async fn test_integration(
        &self,
        integration_id: &str,
    ) -> CreddyResult<IntegrationTestResult> {
        self.post_org_empty(&format!("/v1/integrations/{}/test", integration_id))
            .await
    }

    /// `DELETE /v1/integrations/{id}`.
    pub async fn delete_integration(&self, integration_id: &str) -> CreddyResult<()> {
        self.delete_org(&format!("/v1/integrations/{}", integration_id))
            .await
    }
}

//! Academy status and training endpoints. Training cycles themselves are
//! backend-owned; this client only triggers runs and renders status.

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::{AcademyStatus, TrainingRequest};

impl ApiClient {
    /// `GET /v1/organizations/{org}/academy-status`.
    pub async fn academy_status(&self) -> CreddyResult<AcademyStatus> {
        let org_id = self.org().require()?;
        self.get_org(&format!("/v1/organizations/{}/academy-status", org_id))
            .await
    }

    /// `POST /v1/academy/train/{code}` — trigger a synthetic training run
    /// for one agent.
    pub async fn trigger_training(&self, agent_code: &str) -> CreddyResult<serde_json::Value> {
        let org_id = self.org().require()?.to_string();
        self.post_org(
            &format!("/v1/academy/train/{}", agent_code),
            &TrainingRequest::synthetic(org_id),
        )
        .await
    }

    /// `POST /v1/academy/feedback` — record a thumbs-up/down on an
    /// interaction.
    pub async fn academy_feedback(
        &self,
        interaction_id: &str,
        positive: bool,
    ) -> CreddyResult<serde_json::Value> {
        self.post_org(
            "/v1/academy/feedback",
            &serde_json::json!({
                "interaction_id": interaction_id,
                "positive": positive,
            }),
        )
        .await
    }
}

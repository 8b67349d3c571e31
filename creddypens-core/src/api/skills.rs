//! Skills marketplace endpoints.

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::{OrgSkill, Skill};

impl ApiClient {
    /// `GET /v1/skills` — the public skills catalog.
    pub async fn list_skills(&self) -> CreddyResult<Vec<Skill>> {
        self.get_json("/v1/skills").await
    }

    /// `GET /v1/organizations/{org}/skills` — skills installed for the org.
    pub async fn list_org_skills(&self) -> CreddyResult<Vec<OrgSkill>> {
        let org_id = self.org().require()?;
        self.get_org(&format!("/v1/organizations/{}/skills", org_id))
            .await
    }

    /// `POST /v1/organizations/{org}/skills` — install a skill, optionally
    /// pinned to one agent.
    pub async fn install_skill(
        &self,
        skill_id: &str,
        agent_code: Option<&str>,
    ) -> CreddyResult<OrgSkill> {
        let org_id = self.org().require()?;
        self.post_org(
            &format!("/v1/organizations/{}/skills", org_id),
            &serde_json::json!({ "skill_id": skill_id, "agent_code": agent_code }),
        )
        .await
    }

    /// `DELETE /v1/organizations/{org}/skills/{id}`.
    pub async fn uninstall_skill(&self, skill_id: &str) -> CreddyResult<()> {
        let org_id = self.org().require()?;
        self.delete_org(&format!("/v1/organizations/{}/skills/{}", org_id, skill_id))
            .await
    }
}

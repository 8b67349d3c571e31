//! Agent catalog, hiring, and execution endpoints.

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::{
    Agent, AgentDetail, CheckoutOutcome, DirectorResponse, ExecuteRequest, ExecuteResponse,
    HiredAgent,
};

impl ApiClient {
    /// `GET /v1/agents` — the marketplace catalog, optionally filtered by
    /// department. Not org-scoped; browsing works signed out.
    pub async fn list_agents(&self, department: Option<&str>) -> CreddyResult<Vec<Agent>> {
        let path = match department {
            Some(dept) => format!("/v1/agents?department={}", dept),
            None => "/v1/agents".to_string(),
        };
        self.get_json(&path).await
    }

    /// `GET /v1/agents/{code}` — full dossier for one agent.
    pub async fn get_agent(&self, code: &str) -> CreddyResult<AgentDetail> {
        self.get_json(&format!("/v1/agents/{}", code)).await
    }

    /// `POST /v1/agents/{code}/hire` — direct hire (dev/mock path).
    pub async fn hire_agent(&self, code: &str) -> CreddyResult<serde_json::Value> {
        self.post_org_empty(&format!("/v1/agents/{}/hire", code))
            .await
    }

    /// `POST /v1/agents/{code}/checkout` — start a checkout. The outcome is
    /// either an immediate mock success or a hosted checkout URL the caller
    /// must follow.
    pub async fn checkout_agent(&self, code: &str) -> CreddyResult<CheckoutOutcome> {
        self.post_org_empty(&format!("/v1/agents/{}/checkout", code))
            .await
    }

    /// `GET /v1/organizations/{org}/agents?include_stats=1` — the hired
    /// roster with per-agent usage stats.
    pub async fn list_hired_agents(&self) -> CreddyResult<Vec<HiredAgent>> {
        let org_id = self.org().require()?;
        self.get_org(&format!(
            "/v1/organizations/{}/agents?include_stats=1",
            org_id
        ))
        .await
    }

    /// `POST /v1/agents/{code}/execute` — single-turn, non-streaming.
    pub async fn execute_agent(
        &self,
        code: &str,
        request: &ExecuteRequest,
    ) -> CreddyResult<ExecuteResponse> {
        self.post_org(&format!("/v1/agents/{}/execute", code), request)
            .await
    }

    /// `POST /v1/director/recommend` — ask the director which agents fit a
    /// described need.
    pub async fn director_recommend(&self, message: &str) -> CreddyResult<DirectorResponse> {
        let org_id = self.org().require()?.to_string();
        self.post_json(
            "/v1/director/recommend",
            &serde_json::json!({ "message": message, "org_id": org_id }),
        )
        .await
    }
}

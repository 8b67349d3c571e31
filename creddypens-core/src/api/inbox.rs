//! Task inbox endpoints.

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::{InboxTask, TaskStatus};

impl ApiClient {
    /// `GET /v1/organizations/{org}/inbox`.
    pub async fn list_inbox_tasks(&self) -> CreddyResult<Vec<InboxTask>> {
        let org_id = self.org().require()?;
        self.get_org(&format!("/v1/organizations/{}/inbox", org_id))
            .await
    }

    /// `POST /v1/inbox/tasks/{id}/assign` — hand a task to an agent.
    pub async fn assign_inbox_task(
        &self,
        task_id: &str,
        agent_code: &str,
    ) -> CreddyResult<InboxTask> {
        self.post_org(
            &format!("/v1/inbox/tasks/{}/assign", task_id),
            &serde_json::json!({ "agent_code": agent_code }),
        )
        .await
    }

    /// `POST /v1/inbox/tasks/{id}/status`.
    pub async fn set_inbox_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> CreddyResult<InboxTask> {
        self.post_org(
            &format!("/v1/inbox/tasks/{}/status", task_id),
            &serde_json::json!({ "status": status }),
        )
        .await
    }
}

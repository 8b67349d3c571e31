//! Workflow execution, templates, and schedules. All thin proxies: the
//! backend owns step orchestration and every cron evaluation.

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::{
    ScheduleRunResult, WorkflowRequest, WorkflowRunResult, WorkflowSchedule,
    WorkflowScheduleCreate, WorkflowTemplate, WorkflowTemplateCreate,
};

impl ApiClient {
    /// `POST /v1/workflows/execute` — run the whole chain in one atomic
    /// call. No partial feedback; the full step trace arrives at the end.
    pub async fn execute_workflow(
        &self,
        request: &WorkflowRequest,
    ) -> CreddyResult<WorkflowRunResult> {
        self.post_org("/v1/workflows/execute", request).await
    }

    /// `GET /v1/workflows/templates`.
    pub async fn list_workflow_templates(&self) -> CreddyResult<Vec<WorkflowTemplate>> {
        self.get_org("/v1/workflows/templates").await
    }

    /// `POST /v1/workflows/templates` — save the current step list.
    pub async fn save_workflow_template(
        &self,
        template: &WorkflowTemplateCreate,
    ) -> CreddyResult<WorkflowTemplate> {
        self.post_org("/v1/workflows/templates", template).await
    }

    /// `GET /v1/workflows/schedules`.
    pub async fn list_workflow_schedules(&self) -> CreddyResult<Vec<WorkflowSchedule>> {
        self.get_org("/v1/workflows/schedules").await
    }

    /// `POST /v1/workflows/templates/{id}/schedules` — attach a cron
    /// schedule to a saved template.
    pub async fn create_workflow_schedule(
        &self,
        template_id: &str,
        schedule: &WorkflowScheduleCreate,
    ) -> CreddyResult<WorkflowSchedule> {
        self.post_org(
            &format!("/v1/workflows/templates/{}/schedules", template_id),
            schedule,
        )
        .await
    }

    /// `POST /v1/workflows/schedules/{id}/run` — immediate out-of-band run
    /// of a saved schedule.
    pub async fn run_workflow_schedule(
        &self,
        schedule_id: &str,
    ) -> CreddyResult<ScheduleRunResult> {
        self.post_org_empty(&format!("/v1/workflows/schedules/{}/run", schedule_id))
            .await
    }
}

use serde::{Deserialize, Serialize};

use super::execute::ExecuteContext;

/// One step of a linear workflow chain. When `use_previous_response` is
/// set, the backend feeds step *i-1*'s output into this step's input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub agent_code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "default_true")]
    pub use_previous_response: bool,
}

fn default_true() -> bool {
    true
}

impl WorkflowStep {
    pub fn new(agent_code: impl Into<String>) -> Self {
        Self {
            agent_code: agent_code.into(),
            message: None,
            use_previous_response: true,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn fresh_input(mut self) -> Self {
        self.use_previous_response = false;
        self
    }
}

/// Body of `POST /v1/workflows/execute`. The whole chain is submitted in
/// one call; the client never orchestrates inter-step execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub initial_message: String,
    pub session_id: String,
    pub context: ExecuteContext,
    pub steps: Vec<WorkflowStep>,
}

/// Trace entry for one executed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStepResult {
    pub step_index: u32,
    pub agent_code: String,
    pub response: String,
    #[serde(default)]
    pub latency_ms: i64,
    #[serde(default)]
    pub model_used: String,
    #[serde(default)]
    pub trace_id: String,
}

/// Atomic result of a workflow run. The client sees no intermediate
/// state; the full step trace arrives only when the chain finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRunResult {
    pub workflow_id: String,
    pub session_id: String,
    pub final_response: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStepResult>,
}

/// A saved, reusable step list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub template_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: Option<ExecuteContext>,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /v1/workflows/templates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTemplateCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub context: ExecuteContext,
    pub steps: Vec<WorkflowStep>,
    pub is_active: bool,
}

/// A cron schedule attached to a template. Schedule evaluation is entirely
/// backend-owned; `next_run_at` is displayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSchedule {
    pub schedule_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub template_name: String,
    pub name: String,
    pub cron_expression: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub initial_message: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub next_run_at: Option<String>,
    #[serde(default)]
    pub last_run_at: Option<String>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Body of `POST /v1/workflows/templates/{id}/schedules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowScheduleCreate {
    pub name: String,
    pub cron_expression: String,
    pub timezone: String,
    pub initial_message: String,
    pub is_active: bool,
}

/// Response of `POST /v1/workflows/schedules/{id}/run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRunResult {
    pub workflow: WorkflowRunResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_builder() {
        let step = WorkflowStep::new("AUTHOR-01")
            .with_message("Draft the copy")
            .fresh_input();
        assert_eq!(step.agent_code, "AUTHOR-01");
        assert_eq!(step.message.as_deref(), Some("Draft the copy"));
        assert!(!step.use_previous_response);
    }

    #[test]
    fn test_step_serializes_null_message() {
        let step = WorkflowStep::new("A");
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["message"], serde_json::Value::Null);
        assert_eq!(json["use_previous_response"], true);
    }

    #[test]
    fn test_run_result_decode() {
        let result: WorkflowRunResult = serde_json::from_value(serde_json::json!({
            "workflow_id": "wf_1",
            "session_id": "wf-abc",
            "final_response": "Plan complete.",
            "steps": [
                {"step_index": 0, "agent_code": "A", "response": "draft", "latency_ms": 100,
                 "model_used": "m", "trace_id": "t0"},
                {"step_index": 1, "agent_code": "B", "response": "Plan complete.",
                 "latency_ms": 200, "model_used": "m", "trace_id": "t1"}
            ]
        }))
        .unwrap();
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[0].step_index, 0);
        assert_eq!(result.steps[1].step_index, 1);
        assert_eq!(result.final_response, "Plan complete.");
    }

    #[test]
    fn test_schedule_defaults() {
        let schedule: WorkflowSchedule = serde_json::from_value(serde_json::json!({
            "schedule_id": "s1",
            "name": "Weekly digest",
            "cron_expression": "0 9 * * 1"
        }))
        .unwrap();
        assert_eq!(schedule.timezone, "UTC");
        assert!(schedule.next_run_at.is_none());
        assert!(schedule.is_active);
    }
}

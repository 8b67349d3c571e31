//! Workflow draft editing and validation.
//!
//! The draft accumulates a strictly linear step list plus shared context.
//! Validation happens client-side before any network call; execution is a
//! single atomic backend request (see `api::workflows`). Draft fields stay
//! as typed after a failed run so the user can retry without re-entering
//! anything.

use uuid::Uuid;

use crate::error::{CreddyError, CreddyResult};
use crate::models::{ExecuteContext, OutputFormat, WorkflowRequest, WorkflowStep};

/// An editable multi-agent pipeline.
#[derive(Debug, Clone)]
pub struct WorkflowDraft {
    pub initial_message: String,
    pub steps: Vec<WorkflowStep>,
    pub output_format: OutputFormat,
    pub web_search: bool,
    pub deep_research: bool,
    session_id: String,
}

fn new_session_id() -> String {
    format!("wf-{}", Uuid::new_v4())
}

impl WorkflowDraft {
    /// Start a draft with one step bound to the given agent.
    pub fn new(first_agent_code: impl Into<String>) -> Self {
        Self {
            initial_message: String::new(),
            steps: vec![WorkflowStep::new(first_agent_code)],
            output_format: OutputFormat::Text,
            web_search: false,
            deep_research: false,
            session_id: new_session_id(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Regenerate the session id (used after a completed run so reruns are
    /// causally independent).
    pub fn reset_session(&mut self) {
        self.session_id = new_session_id();
    }

    pub fn add_step(&mut self, agent_code: impl Into<String>) {
        self.steps.push(WorkflowStep::new(agent_code));
    }

    /// Remove a step by index. The last remaining step cannot be removed;
    /// a chain always has length >= 1.
    pub fn remove_step(&mut self, index: usize) {
        if self.steps.len() > 1 && index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    pub fn set_step_agent(&mut self, index: usize, agent_code: impl Into<String>) {
        if let Some(step) = self.steps.get_mut(index) {
            step.agent_code = agent_code.into();
        }
    }

    pub fn set_step_message(&mut self, index: usize, message: Option<String>) {
        if let Some(step) = self.steps.get_mut(index) {
            step.message = message.filter(|m| !m.trim().is_empty());
        }
    }

    pub fn toggle_step_chaining(&mut self, index: usize) {
        if let Some(step) = self.steps.get_mut(index) {
            step.use_previous_response = !step.use_previous_response;
        }
    }

    /// Whether the draft can execute. Mirrors [`Self::validate`] as a
    /// cheap boolean for enabling/disabling the run control.
    pub fn can_run(&self) -> bool {
        self.validate().is_ok()
    }

    /// Client-side validation. A draft that fails here never reaches the
    /// network.
    pub fn validate(&self) -> CreddyResult<()> {
        if self.initial_message.trim().is_empty() {
            return Err(CreddyError::validation(
                "Workflow requires an initial task description",
            ));
        }
        if self.steps.is_empty() {
            return Err(CreddyError::validation(
                "Workflow requires at least one step",
            ));
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.agent_code.trim().is_empty() {
                return Err(CreddyError::validation(format!(
                    "Workflow step {} has no agent assigned",
                    index
                )));
            }
        }
        Ok(())
    }

    /// Build the atomic execute request. Fails without side effects when
    /// the draft is invalid.
    pub fn to_request(&self) -> CreddyResult<WorkflowRequest> {
        self.validate()?;

        let mut additional = serde_json::Map::new();
        additional.insert(
            "source".to_string(),
            serde_json::Value::String("workflow_runner".to_string()),
        );

        Ok(WorkflowRequest {
            initial_message: self.initial_message.trim().to_string(),
            session_id: self.session_id.clone(),
            context: ExecuteContext {
                output_format: Some(self.output_format),
                web_search: self.web_search,
                deep_research: self.deep_research,
                additional,
                ..ExecuteContext::default()
            },
            steps: self.steps.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_has_one_step() {
        let draft = WorkflowDraft::new("AUTHOR-01");
        assert_eq!(draft.steps.len(), 1);
        assert_eq!(draft.steps[0].agent_code, "AUTHOR-01");
        assert!(draft.session_id().starts_with("wf-"));
    }

    #[test]
    fn test_validation_requires_initial_message() {
        let draft = WorkflowDraft::new("A");
        assert!(!draft.can_run());
        assert!(draft.to_request().is_err());

        let mut draft = draft;
        draft.initial_message = "   ".to_string();
        assert!(!draft.can_run());

        draft.initial_message = "Draft a plan".to_string();
        assert!(draft.can_run());
    }

    #[test]
    fn test_validation_rejects_blank_agent_code() {
        let mut draft = WorkflowDraft::new("A");
        draft.initial_message = "Draft a plan".to_string();
        draft.add_step("");
        let err = draft.to_request().unwrap_err();
        assert!(matches!(err, CreddyError::Validation(_)));
        assert!(err.to_string().contains("step 1"));
    }

    #[test]
    fn test_last_step_cannot_be_removed() {
        let mut draft = WorkflowDraft::new("A");
        draft.remove_step(0);
        assert_eq!(draft.steps.len(), 1);

        draft.add_step("B");
        draft.remove_step(0);
        assert_eq!(draft.steps.len(), 1);
        assert_eq!(draft.steps[0].agent_code, "B");
    }

    #[test]
    fn test_step_editing() {
        let mut draft = WorkflowDraft::new("A");
        draft.add_step("B");
        draft.set_step_agent(1, "C");
        draft.set_step_message(1, Some("Refine the draft".to_string()));
        draft.toggle_step_chaining(1);

        assert_eq!(draft.steps[1].agent_code, "C");
        assert_eq!(draft.steps[1].message.as_deref(), Some("Refine the draft"));
        assert!(!draft.steps[1].use_previous_response);

        // Blank messages normalize to None.
        draft.set_step_message(1, Some("  ".to_string()));
        assert!(draft.steps[1].message.is_none());
    }

    #[test]
    fn test_to_request_shape() {
        let mut draft = WorkflowDraft::new("A");
        draft.initial_message = "Draft a plan".to_string();
        draft.add_step("B");
        draft.output_format = OutputFormat::Markdown;
        draft.web_search = true;

        let request = draft.to_request().unwrap();
        assert_eq!(request.initial_message, "Draft a plan");
        assert_eq!(request.steps.len(), 2);
        assert_eq!(request.session_id, draft.session_id());
        assert!(request.context.web_search);
        assert_eq!(
            request.context.additional.get("source").and_then(|v| v.as_str()),
            Some("workflow_runner")
        );
    }

    #[test]
    fn test_reset_session_changes_id() {
        let mut draft = WorkflowDraft::new("A");
        let first = draft.session_id().to_string();
        draft.reset_session();
        assert_ne!(draft.session_id(), first);
    }
}

//! Typed schemas for the backend API.
//!
//! Optional response fields are decoded exactly once here (serde defaults
//! and `Option`s); downstream code never branches on raw JSON presence.

pub mod academy;
pub mod agent;
pub mod analytics;
pub mod execute;
pub mod integration;
pub mod memory;
pub mod skill;
pub mod task;
pub mod workflow;

pub use academy::{AcademyStatus, TrainingRequest, TrainingSession};
pub use agent::{
    Agent, AgentDetail, AgentStats, CheckoutMode, CheckoutOutcome, DirectorRecommendation,
    DirectorResponse, HiredAgent, HiredAgentInfo, SuggestedAgent,
};
pub use analytics::{
    ActivityPoint, ActivityReport, AnalyticsOverview, CostReport, DashboardStats, DepartmentCost,
    RecentActivity,
};
pub use execute::{
    AttachmentRef, ExecuteContext, ExecuteRequest, ExecuteResponse, OutputFormat,
    MAX_EXCERPT_CHARS,
};
pub use integration::{Integration, IntegrationTestResult};
pub use memory::{MemoryCreate, MemoryExtractResult, MemoryItem, MEMORY_TYPES};
pub use skill::{OrgSkill, Skill};
pub use task::{InboxTask, TaskPriority, TaskStatus};
pub use workflow::{
    ScheduleRunResult, WorkflowRequest, WorkflowRunResult, WorkflowSchedule,
    WorkflowScheduleCreate, WorkflowStep, WorkflowStepResult, WorkflowTemplate,
    WorkflowTemplateCreate,
};

mod academy;
mod agents;
mod analytics;
mod chat;
mod director;
mod inbox;
mod integrations;
mod login;
mod memories;
mod skills;
mod workflows;

pub use academy::{handle_academy_command, AcademyCommand};
pub use agents::{handle_agents_command, AgentsCommand};
pub use analytics::{handle_analytics_command, AnalyticsCommand};
pub use chat::{handle_chat_command, ChatArgs};
pub use director::handle_director_command;
pub use inbox::{handle_inbox_command, InboxCommand};
pub use integrations::{handle_integrations_command, IntegrationsCommand};
pub use login::{handle_login_command, LoginArgs};
pub use memories::{handle_memories_command, MemoriesCommand};
pub use skills::{handle_skills_command, SkillsCommand};
pub use workflows::{handle_workflow_command, WorkflowCommand};

//! Core client library for the CreddyPens AI-staff marketplace.
//!
//! Everything stateful lives behind the backend API; this crate provides
//! the typed client, the SSE streaming chat pipeline, and the workflow
//! runner that the CLI and TUI front ends drive.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod org;
pub mod sse;
pub mod workflow;

pub use api::{AgentStream, ApiClient, ORG_HEADER};
pub use chat::{ChatMessage, ChatRole, ChatSession, ChatState, ResponseMetadata, ERROR_MESSAGE};
pub use config::{ConfigLoadError, CreddyConfig};
pub use error::{CliErrorDisplay, CreddyError, CreddyResult};
pub use org::{OrgContext, ORG_ID_ENV};
pub use sse::{SseParser, SseRecord, StreamDone, StreamEvent};
pub use workflow::WorkflowDraft;

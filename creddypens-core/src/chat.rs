//! Chat session state machine.
//!
//! One session per open conversation: a linear, append-only message list,
//! a client-generated session id, and an `Idle`/`Streaming` state with at
//! most one request in flight. The session is headless — front ends feed
//! it user input and stream events and render `messages()`/`partial()`.
//!
//! Rules, in order of appearance:
//! - sends require non-empty trimmed input and an idle session; anything
//!   else is an idempotent no-op, not an error;
//! - the user message is appended optimistically and never rolled back;
//! - `token` events replace the partial transcript (cumulative, not an
//!   append);
//! - the terminal `done.response` is authoritative over token text;
//! - failures append a fixed synthetic agent message; cancellation appends
//!   nothing and is silent;
//! - switching agents always regenerates the session id.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    AttachmentRef, ExecuteContext, ExecuteRequest, ExecuteResponse, OutputFormat, SuggestedAgent,
};
use crate::sse::StreamDone;

/// Fixed text appended as an agent message when a request fails. The
/// transcript stays a complete record including failures; the user resends
/// manually.
pub const ERROR_MESSAGE: &str = "ERROR: Failed to process request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Agent,
}

/// Response metadata attached to agent messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseMetadata {
    pub model_used: String,
    pub latency_ms: i64,
    pub tokens_used: u64,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: Option<ResponseMetadata>,
    pub interaction_id: Option<String>,
    pub suggested_agent: Option<SuggestedAgent>,
}

impl ChatMessage {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: None,
            interaction_id: None,
            suggested_agent: None,
        }
    }

    fn agent(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Agent,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: None,
            interaction_id: None,
            suggested_agent: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    /// Exactly one request in flight, identified for logging/tracing.
    Streaming { request_id: Uuid },
}

impl ChatState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, ChatState::Streaming { .. })
    }
}

fn new_session_id() -> String {
    format!("chat-{}", Uuid::new_v4())
}

/// A single agent conversation.
#[derive(Debug)]
pub struct ChatSession {
    agent_code: String,
    session_id: String,
    state: ChatState,
    messages: Vec<ChatMessage>,
    partial: String,

    // Tool toggles carried into every outbound payload.
    pub web_search: bool,
    pub deep_research: bool,
    pub output_format: OutputFormat,
    pub voice_input_used: bool,
    attachments: Vec<AttachmentRef>,
}

impl ChatSession {
    pub fn new(agent_code: impl Into<String>) -> Self {
        Self {
            agent_code: agent_code.into(),
            session_id: new_session_id(),
            state: ChatState::Idle,
            messages: Vec::new(),
            partial: String::new(),
            web_search: false,
            deep_research: false,
            output_format: OutputFormat::Text,
            voice_input_used: false,
            attachments: Vec::new(),
        }
    }

    pub fn agent_code(&self) -> &str {
        &self.agent_code
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state.is_streaming()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The live partial transcript while streaming.
    pub fn partial(&self) -> &str {
        &self.partial
    }

    pub fn attachments(&self) -> &[AttachmentRef] {
        &self.attachments
    }

    pub fn attach(&mut self, attachment: AttachmentRef) {
        self.attachments.push(attachment);
    }

    pub fn clear_attachments(&mut self) {
        self.attachments.clear();
    }

    /// Push a greeting or other locally-authored agent line (the "reporting
    /// for duty" opener).
    pub fn push_agent_note(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::agent(content));
    }

    /// Retarget the session at a different agent. Always yields a fresh
    /// session id; any in-flight stream is considered abandoned (the caller
    /// aborts the transport side).
    pub fn switch_agent(&mut self, agent_code: impl Into<String>) {
        self.agent_code = agent_code.into();
        self.session_id = new_session_id();
        self.state = ChatState::Idle;
        self.partial.clear();
        self.messages.clear();
        self.attachments.clear();
    }

    /// Attempt to start a send. Returns the outbound request when the input
    /// is non-empty and nothing is in flight; otherwise `None` (a no-op, by
    /// contract — not an error). On success the user message is appended
    /// immediately and the session transitions to `Streaming`.
    pub fn begin_send(&mut self, input: &str) -> Option<ExecuteRequest> {
        let trimmed = input.trim();
        if trimmed.is_empty() || self.is_streaming() {
            return None;
        }

        self.messages.push(ChatMessage::user(trimmed));
        self.partial.clear();
        self.state = ChatState::Streaming {
            request_id: Uuid::new_v4(),
        };

        let mut additional = serde_json::Map::new();
        if self.voice_input_used {
            additional.insert("voice_input".to_string(), serde_json::Value::Bool(true));
        }

        let request = ExecuteRequest {
            message: trimmed.to_string(),
            context: ExecuteContext {
                output_format: Some(self.output_format),
                web_search: self.web_search,
                deep_research: self.deep_research,
                attachments: std::mem::take(&mut self.attachments),
                additional,
                ..ExecuteContext::default()
            },
            session_id: self.session_id.clone(),
            file_ids: Vec::new(),
        };
        self.voice_input_used = false;
        Some(request)
    }

    /// Apply a cumulative `token` event: replace, never append.
    pub fn apply_token(&mut self, partial_text: impl Into<String>) {
        if self.is_streaming() {
            self.partial = partial_text.into();
        }
    }

    /// Terminal success from the streaming path. `done.response` is
    /// authoritative; an empty response after non-empty tokens is logged
    /// and kept as-is rather than patched from the partial.
    pub fn finish_stream(&mut self, done: StreamDone) {
        if !self.is_streaming() {
            return;
        }
        if done.response.is_empty() && !self.partial.is_empty() {
            tracing::warn!(
                agent = %self.agent_code,
                partial_chars = self.partial.len(),
                "Stream completed with empty response after non-empty tokens"
            );
        }

        let mut message = ChatMessage::agent(done.response);
        message.metadata = Some(ResponseMetadata {
            model_used: done.model_used,
            latency_ms: done.latency_ms,
            tokens_used: done.tokens_used,
        });
        message.suggested_agent = done.suggested_agent;
        self.messages.push(message);
        self.partial.clear();
        self.state = ChatState::Idle;
    }

    /// Terminal success from the non-streaming execute path.
    pub fn finish_response(&mut self, response: ExecuteResponse) {
        if !self.is_streaming() {
            return;
        }
        let mut message = ChatMessage::agent(response.response);
        message.metadata = Some(ResponseMetadata {
            model_used: response.model_used,
            latency_ms: response.latency_ms,
            tokens_used: response.tokens_used,
        });
        message.interaction_id = response.interaction_id;
        message.suggested_agent = response.suggested_agent;
        self.messages.push(message);
        self.partial.clear();
        self.state = ChatState::Idle;
    }

    /// Terminal failure: append the fixed error bubble and return to idle.
    /// The optimistic user message stays. No automatic retry.
    pub fn fail(&mut self, detail: &str) {
        if !self.is_streaming() {
            return;
        }
        tracing::warn!(agent = %self.agent_code, detail, "Chat request failed");
        self.messages.push(ChatMessage::agent(ERROR_MESSAGE));
        self.partial.clear();
        self.state = ChatState::Idle;
    }

    /// User-initiated cancellation: silent, nothing appended.
    pub fn cancel(&mut self) {
        self.partial.clear();
        self.state = ChatState::Idle;
    }

    /// The most recent referral hint, if the last agent message carried one.
    pub fn pending_referral(&self) -> Option<&SuggestedAgent> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::Agent)
            .and_then(|m| m.suggested_agent.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn done(response: &str) -> StreamDone {
        StreamDone {
            response: response.to_string(),
            latency_ms: 120,
            tokens_used: 9,
            model_used: "gpt-4o-mini".to_string(),
            suggested_agent: None,
        }
    }

    #[test]
    fn test_send_rejects_empty_and_whitespace() {
        let mut session = ChatSession::new("AUTHOR-01");
        assert!(session.begin_send("").is_none());
        assert!(session.begin_send("   \n\t ").is_none());
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn test_send_rejects_while_streaming() {
        let mut session = ChatSession::new("AUTHOR-01");
        assert!(session.begin_send("first").is_some());
        assert!(session.is_streaming());
        // Second send while in flight: idempotent no-op.
        assert!(session.begin_send("second").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_happy_path_one_user_one_agent_message() {
        let mut session = ChatSession::new("AUTHOR-01");
        let request = session.begin_send("Write a tagline").unwrap();
        assert_eq!(request.message, "Write a tagline");
        assert_eq!(request.session_id, session.session_id());

        session.apply_token("Taglines coming");
        session.finish_stream(done("Taglines: ship faster."));

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, ChatRole::User);
        assert_eq!(session.messages()[1].role, ChatRole::Agent);
        assert_eq!(session.messages()[1].content, "Taglines: ship faster.");
        assert!(!session.is_streaming());
        // Send is re-enabled after completion.
        assert!(session.begin_send("again").is_some());
    }

    #[test]
    fn test_token_replaces_not_appends() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.begin_send("hi").unwrap();
        session.apply_token("Hello");
        assert_eq!(session.partial(), "Hello");
        session.apply_token("Hello there");
        assert_eq!(session.partial(), "Hello there");
    }

    #[test]
    fn test_done_is_authoritative_over_last_token() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.begin_send("hi").unwrap();
        session.apply_token("Hello");
        session.apply_token("Hello there");
        session.finish_stream(done("Hello there!"));
        assert_eq!(session.messages()[1].content, "Hello there!");
        assert_eq!(session.partial(), "");
    }

    #[test]
    fn test_empty_done_after_tokens_kept_verbatim() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.begin_send("hi").unwrap();
        session.apply_token("Hello there");
        session.finish_stream(done(""));
        // Authoritative even when empty; flagged via tracing, not patched.
        assert_eq!(session.messages()[1].content, "");
    }

    #[test]
    fn test_failure_appends_fixed_error_and_keeps_user_message() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.begin_send("hi").unwrap();
        session.fail("HTTP 503");

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, ChatRole::User);
        assert_eq!(session.messages()[1].content, ERROR_MESSAGE);
        assert!(!session.is_streaming());
    }

    #[test]
    fn test_cancel_is_silent() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.begin_send("hi").unwrap();
        session.apply_token("partial text");
        session.cancel();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.partial(), "");
        assert!(!session.is_streaming());
    }

    #[test]
    fn test_switch_agent_regenerates_session_id() {
        let mut session = ChatSession::new("AUTHOR-01");
        let first = session.session_id().to_string();
        session.switch_agent("LEDGER-02");
        assert_ne!(session.session_id(), first);
        assert_eq!(session.agent_code(), "LEDGER-02");

        // Even switching "back" yields a fresh id.
        let second = session.session_id().to_string();
        session.switch_agent("AUTHOR-01");
        assert_ne!(session.session_id(), second);
        assert_ne!(session.session_id(), first);
    }

    #[test]
    fn test_payload_carries_tool_flags_and_attachments() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.web_search = true;
        session.deep_research = true;
        session.output_format = OutputFormat::Markdown;
        session.voice_input_used = true;
        session.attach(AttachmentRef::from_text(
            "notes.txt",
            Some("text/plain".into()),
            "meeting notes",
            13,
        ));

        let request = session.begin_send("summarize my notes").unwrap();
        assert!(request.context.web_search);
        assert!(request.context.deep_research);
        assert_eq!(request.context.output_format, Some(OutputFormat::Markdown));
        assert_eq!(request.context.attachments.len(), 1);
        assert_eq!(
            request.context.additional.get("voice_input"),
            Some(&serde_json::Value::Bool(true))
        );
        // Attachments and the voice flag are consumed by the send.
        assert!(session.attachments().is_empty());
        assert!(!session.voice_input_used);
    }

    #[test]
    fn test_referral_surfaced_from_last_agent_message() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.begin_send("tax question").unwrap();
        let mut terminal = done("Ask finance.");
        terminal.suggested_agent = Some(SuggestedAgent {
            code: "LEDGER-02".to_string(),
            name: "Bookkeeper".to_string(),
            tagline: None,
            department: Some("Finance".to_string()),
            reason: "Out of domain".to_string(),
            is_hired: false,
            handoff_context: "tax question".to_string(),
        });
        session.finish_stream(terminal);

        let referral = session.pending_referral().unwrap();
        assert_eq!(referral.code, "LEDGER-02");
        assert!(!referral.is_hired);
    }

    #[test]
    fn test_late_events_after_cancel_are_ignored() {
        let mut session = ChatSession::new("AUTHOR-01");
        session.begin_send("hi").unwrap();
        session.cancel();

        // Events arriving after cancellation must not mutate the session.
        session.apply_token("ghost");
        session.finish_stream(done("ghost!"));
        session.fail("ghost error");

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.partial(), "");
    }
}

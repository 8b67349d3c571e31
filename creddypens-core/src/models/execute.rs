use serde::{Deserialize, Serialize};

use super::agent::SuggestedAgent;

/// Character budget for attachment content excerpts. Matches the backend
/// schema limit; anything longer is truncated client-side before it enters
/// the JSON payload.
pub const MAX_EXCERPT_CHARS: usize = 2000;

/// Requested shape of the agent's answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
    Email,
    Csv,
    Code,
    Presentation,
}

impl OutputFormat {
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Text,
            OutputFormat::Markdown,
            OutputFormat::Json,
            OutputFormat::Email,
            OutputFormat::Csv,
            OutputFormat::Code,
            OutputFormat::Presentation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Email => "email",
            OutputFormat::Csv => "csv",
            OutputFormat::Code => "code",
            OutputFormat::Presentation => "presentation",
        }
    }

    pub fn parse(s: &str) -> Option<OutputFormat> {
        OutputFormat::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s.to_lowercase())
    }

    /// Cycle to the next format, wrapping around. Used by the TUI toggle.
    pub fn next(&self) -> OutputFormat {
        let all = OutputFormat::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file reference carried in the execute payload. Never contains binary
/// data: text-like files carry a truncated excerpt, images a placeholder
/// description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub content_excerpt: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl AttachmentRef {
    /// Reference a text-like file, truncating the excerpt to
    /// [`MAX_EXCERPT_CHARS`] on a character boundary.
    pub fn from_text(
        name: impl Into<String>,
        mime_type: Option<String>,
        content: &str,
        size_bytes: u64,
    ) -> Self {
        let excerpt: String = content.chars().take(MAX_EXCERPT_CHARS).collect();
        Self {
            name: name.into(),
            mime_type,
            content_excerpt: Some(excerpt),
            size_bytes: Some(size_bytes),
        }
    }

    /// Reference an image by name only.
    pub fn image_placeholder(
        name: impl Into<String>,
        mime_type: Option<String>,
        size_bytes: u64,
    ) -> Self {
        let name = name.into();
        Self {
            content_excerpt: Some(format!("[image attachment: {}]", name)),
            name,
            mime_type,
            size_bytes: Some(size_bytes),
        }
    }
}

/// Shared request context: client identity hints plus tool flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteContext {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub output_format: Option<OutputFormat>,
    #[serde(default)]
    pub web_search: bool,
    #[serde(default = "default_true")]
    pub doc_retrieval: bool,
    #[serde(default)]
    pub deep_research: bool,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default)]
    pub additional: serde_json::Map<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

impl Default for ExecuteContext {
    fn default() -> Self {
        Self {
            company_name: None,
            tone: None,
            output_format: None,
            web_search: false,
            doc_retrieval: true,
            deep_research: false,
            attachments: Vec::new(),
            additional: serde_json::Map::new(),
        }
    }
}

/// Body of `POST /v1/agents/{code}/execute` (and its streaming variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub message: String,
    pub context: ExecuteContext,
    pub session_id: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

/// Response of the single-turn execute endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub agent_code: String,
    pub response: String,
    pub model_used: String,
    #[serde(default)]
    pub search_used: bool,
    #[serde(default)]
    pub docs_used: bool,
    pub latency_ms: i64,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub interaction_id: Option<String>,
    pub trace_id: String,
    pub session_id: String,
    #[serde(default)]
    pub referral_triggered: bool,
    #[serde(default)]
    pub suggested_agent: Option<SuggestedAgent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_roundtrip() {
        for format in OutputFormat::all() {
            assert_eq!(OutputFormat::parse(format.as_str()), Some(*format));
        }
        assert_eq!(OutputFormat::parse("MARKDOWN"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::parse("pdf"), None);
    }

    #[test]
    fn test_output_format_serializes_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Presentation).unwrap();
        assert_eq!(json, r#""presentation""#);
    }

    #[test]
    fn test_output_format_next_wraps() {
        let mut format = OutputFormat::Text;
        for _ in 0..OutputFormat::all().len() {
            format = format.next();
        }
        assert_eq!(format, OutputFormat::Text);
    }

    #[test]
    fn test_attachment_excerpt_truncation() {
        let long = "x".repeat(MAX_EXCERPT_CHARS + 500);
        let att = AttachmentRef::from_text("notes.txt", Some("text/plain".into()), &long, 9000);
        assert_eq!(
            att.content_excerpt.as_ref().unwrap().chars().count(),
            MAX_EXCERPT_CHARS
        );
    }

    #[test]
    fn test_attachment_excerpt_multibyte_boundary() {
        let long = "é".repeat(MAX_EXCERPT_CHARS + 10);
        let att = AttachmentRef::from_text("notes.txt", None, &long, 0);
        let excerpt = att.content_excerpt.unwrap();
        assert_eq!(excerpt.chars().count(), MAX_EXCERPT_CHARS);
        assert!(excerpt.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_image_placeholder_has_no_content() {
        let att = AttachmentRef::image_placeholder("logo.png", Some("image/png".into()), 120_000);
        assert_eq!(
            att.content_excerpt.as_deref(),
            Some("[image attachment: logo.png]")
        );
    }

    #[test]
    fn test_context_doc_retrieval_defaults_true() {
        let ctx: ExecuteContext = serde_json::from_str("{}").unwrap();
        assert!(ctx.doc_retrieval);
        assert!(!ctx.web_search);

        let ctx = ExecuteContext::default();
        assert!(ctx.doc_retrieval);
    }

    #[test]
    fn test_execute_response_optional_fields() {
        let resp: ExecuteResponse = serde_json::from_value(serde_json::json!({
            "agent_code": "AUTHOR-01",
            "response": "Done.",
            "model_used": "gpt-4o-mini",
            "latency_ms": 420,
            "trace_id": "t1",
            "session_id": "chat-abc"
        }))
        .unwrap();
        assert_eq!(resp.tokens_used, 0);
        assert!(resp.suggested_agent.is_none());
        assert!(!resp.referral_triggered);
    }
}

use serde::{Deserialize, Serialize};

/// A stored organization memory (preference, fact, instruction, context).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    pub memory_id: String,
    pub org_id: String,
    #[serde(default)]
    pub agent_code: Option<String>,
    pub memory_type: String,
    pub memory_key: String,
    pub memory_value: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub access_count: u64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Known memory types, as offered by the settings form.
pub const MEMORY_TYPES: &[&str] = &["preference", "org_fact", "instruction", "context"];

/// Body of `POST /v1/organizations/{org}/memories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCreate {
    pub memory_type: String,
    pub memory_key: String,
    pub memory_value: String,
    #[serde(default)]
    pub agent_code: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_confidence() -> f64 {
    0.8
}

fn default_source() -> String {
    "manual".to_string()
}

impl MemoryCreate {
    pub fn new(
        memory_type: impl Into<String>,
        memory_key: impl Into<String>,
        memory_value: impl Into<String>,
    ) -> Self {
        Self {
            memory_type: memory_type.into(),
            memory_key: memory_key.into(),
            memory_value: memory_value.into(),
            agent_code: None,
            confidence: default_confidence(),
            source: default_source(),
        }
    }

    pub fn for_agent(mut self, agent_code: impl Into<String>) -> Self {
        self.agent_code = Some(agent_code.into());
        self
    }
}

/// Result of `POST /v1/organizations/{org}/memories/extract`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryExtractResult {
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub memories: Vec<MemoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_create_defaults() {
        let create = MemoryCreate::new("preference", "tone", "casual");
        assert_eq!(create.confidence, 0.8);
        assert_eq!(create.source, "manual");
        assert!(create.agent_code.is_none());

        let scoped = MemoryCreate::new("instruction", "sign-off", "Best, CP")
            .for_agent("AUTHOR-01");
        assert_eq!(scoped.agent_code.as_deref(), Some("AUTHOR-01"));
    }

    #[test]
    fn test_memory_item_decode() {
        let item: MemoryItem = serde_json::from_value(serde_json::json!({
            "memory_id": "m1",
            "org_id": "org_test",
            "memory_type": "org_fact",
            "memory_key": "industry",
            "memory_value": "fintech"
        }))
        .unwrap();
        assert!(item.is_active);
        assert_eq!(item.access_count, 0);
    }
}

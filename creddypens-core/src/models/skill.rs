use serde::{Deserialize, Serialize};

/// A skill in the marketplace catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub compatible_agents: Vec<String>,
    #[serde(default)]
    pub domain_tags: Vec<String>,
    #[serde(default)]
    pub tool_actions: Vec<String>,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub install_count: u64,
    #[serde(default)]
    pub created_at: String,
}

/// A skill installed for the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgSkill {
    pub skill_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub agent_code: Option<String>,
    #[serde(default)]
    pub installed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_decode() {
        let skill: Skill = serde_json::from_value(serde_json::json!({
            "skill_id": "s1",
            "name": "Invoice OCR",
            "category": "finance",
            "compatible_agents": ["LEDGER-02"],
            "price_cents": 900,
            "install_count": 14
        }))
        .unwrap();
        assert_eq!(skill.install_count, 14);
        assert_eq!(skill.compatible_agents, vec!["LEDGER-02"]);
        assert!(skill.domain_tags.is_empty());
    }
}

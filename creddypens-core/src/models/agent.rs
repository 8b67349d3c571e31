use serde::{Deserialize, Serialize};

/// A marketplace agent as listed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: String,
    pub code: String,
    pub role: String,
    #[serde(default)]
    pub description: String,
    pub department: String,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub llm_provider: Option<String>,
    #[serde(default)]
    pub llm_model: Option<String>,
    #[serde(default)]
    pub llm_route: Option<String>,
}

impl Agent {
    /// Monthly price in whole dollars, as rendered in listings.
    pub fn price_monthly(&self) -> i64 {
        self.price_cents / 100
    }
}

/// Full agent dossier, including the routing profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDetail {
    #[serde(flatten)]
    pub agent: Agent,
    #[serde(default)]
    pub llm_profile: serde_json::Value,
    #[serde(default)]
    pub system_prompt: String,
}

/// Per-agent usage stats attached to a hired agent listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentStats {
    #[serde(default)]
    pub tasks_today: u64,
    #[serde(default)]
    pub avg_latency_ms: i64,
    #[serde(default)]
    pub quality_score: f64,
}

/// Catalog identity of a hired agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiredAgentInfo {
    pub agent_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
}

/// An agent deployed to the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiredAgent {
    pub id: String,
    pub agent: HiredAgentInfo,
    #[serde(default)]
    pub stats: AgentStats,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub hired_at: String,
}

/// Referral hint attached to a response when the answering agent detects
/// the question is outside its domain. Purely advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAgent {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub reason: String,
    pub is_hired: bool,
    /// The original user question, forwarded so the referred agent has
    /// context when the user switches.
    #[serde(default)]
    pub handoff_context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// Simulated checkout; the hire completes immediately.
    Mock,
    /// Hosted checkout; the caller must follow `checkout_url`.
    Stripe,
}

/// Result of `POST /v1/agents/{code}/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutOutcome {
    #[serde(default = "default_checkout_mode")]
    pub mode: CheckoutMode,
    #[serde(default)]
    pub checkout_url: Option<String>,
}

fn default_checkout_mode() -> CheckoutMode {
    CheckoutMode::Mock
}

impl CheckoutOutcome {
    /// True when the backend wants the user sent to a hosted checkout page.
    pub fn needs_redirect(&self) -> bool {
        self.mode == CheckoutMode::Stripe && self.checkout_url.is_some()
    }
}

/// One recommendation from the director endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorRecommendation {
    pub agent_code: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub price_monthly: i64,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub recommendations: Vec<DirectorRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_price_monthly() {
        let agent: Agent = serde_json::from_value(serde_json::json!({
            "agent_id": "a1",
            "code": "AUTHOR-01",
            "role": "Copywriter",
            "department": "Marketing",
            "price_cents": 4900
        }))
        .unwrap();
        assert_eq!(agent.price_monthly(), 49);
        assert!(agent.llm_provider.is_none());
    }

    #[test]
    fn test_hired_agent_defaults_missing_stats() {
        let hired: HiredAgent = serde_json::from_value(serde_json::json!({
            "id": "h1",
            "agent": {"agent_code": "AUTHOR-01"}
        }))
        .unwrap();
        assert_eq!(hired.stats.tasks_today, 0);
        assert_eq!(hired.stats.quality_score, 0.0);
    }

    #[test]
    fn test_checkout_outcome_redirect() {
        let mock: CheckoutOutcome = serde_json::from_str(r#"{"mode":"mock"}"#).unwrap();
        assert!(!mock.needs_redirect());

        let stripe: CheckoutOutcome = serde_json::from_str(
            r#"{"mode":"stripe","checkout_url":"https://checkout.example/cs_1"}"#,
        )
        .unwrap();
        assert!(stripe.needs_redirect());
    }

    #[test]
    fn test_suggested_agent_decode() {
        let suggested: SuggestedAgent = serde_json::from_value(serde_json::json!({
            "code": "LEDGER-02",
            "name": "Bookkeeper",
            "reason": "Tax questions belong to finance",
            "is_hired": false,
            "handoff_context": "How do I file VAT?"
        }))
        .unwrap();
        assert_eq!(suggested.code, "LEDGER-02");
        assert!(!suggested.is_hired);
        assert!(suggested.tagline.is_none());
    }
}

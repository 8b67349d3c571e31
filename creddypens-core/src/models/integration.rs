use serde::{Deserialize, Serialize};

/// A configured delivery integration (slack, email, webhook). The config
/// shape is integration-specific and owned by the backend, so it stays an
/// opaque JSON object here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub integration_id: String,
    pub org_id: String,
    pub integration_type: String,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Result of `POST /v1/integrations/{id}/test`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationTestResult {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_decode() {
        let item: Integration = serde_json::from_value(serde_json::json!({
            "integration_id": "i1",
            "org_id": "org_test",
            "integration_type": "slack",
            "config": {"webhook_url": "https://hooks.slack.example/T1"}
        }))
        .unwrap();
        assert!(item.is_active);
        assert_eq!(item.integration_type, "slack");
        assert!(item.config.get("webhook_url").is_some());
    }
}

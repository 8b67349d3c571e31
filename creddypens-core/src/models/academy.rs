use serde::{Deserialize, Serialize};

/// One finished training session in the academy feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    pub agent_code: String,
    #[serde(default)]
    pub trainer_id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub completed_at: String,
}

/// `GET /v1/organizations/{org}/academy-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcademyStatus {
    #[serde(default)]
    pub agents_in_training: u64,
    #[serde(default)]
    pub avg_quality_score: f64,
    #[serde(default)]
    pub quality_trend: String,
    #[serde(default)]
    pub next_cycle_hours: f64,
    #[serde(default)]
    pub recent_sessions: Vec<TrainingSession>,
}

/// Body of `POST /v1/academy/train/{code}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub org_id: String,
    pub run_type: String,
    pub scenario_count: u32,
}

impl TrainingRequest {
    /// The default synthetic training run the dashboard triggers.
    pub fn synthetic(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            run_type: "synthetic".to_string(),
            scenario_count: 100,
        }
    }
}

use serde::{Deserialize, Serialize};

/// `GET /v1/organizations/{org}/analytics/overview`.
///
/// Missing numeric fields decode to zero so dashboards render an empty
/// organization as zeros rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub total_interactions: u64,
    #[serde(default)]
    pub active_agents: u64,
    #[serde(default)]
    pub avg_latency_ms: f64,
    #[serde(default)]
    pub avg_quality_score: f64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub total_tasks: u64,
    #[serde(default)]
    pub completed_tasks: u64,
    #[serde(default)]
    pub task_completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCost {
    pub department: String,
    #[serde(default)]
    pub interactions: u64,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub estimated_cost_usd: f64,
}

/// `GET /v1/organizations/{org}/analytics/costs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostReport {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub total_estimated_cost_usd: f64,
    #[serde(default)]
    pub departments: Vec<DepartmentCost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub day: String,
    #[serde(default)]
    pub interactions: u64,
    #[serde(default)]
    pub avg_latency_ms: f64,
    #[serde(default)]
    pub avg_quality_score: f64,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub tasks_created: u64,
    #[serde(default)]
    pub tasks_completed: u64,
}

/// `GET /v1/organizations/{org}/analytics/activity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityReport {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub series: Vec<ActivityPoint>,
}

impl ActivityReport {
    /// The busiest day in the series, if any.
    pub fn peak_day(&self) -> Option<&ActivityPoint> {
        self.series.iter().max_by_key(|p| p.interactions)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivity {
    pub agent_code: String,
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub task_summary: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub latency_ms: i64,
}

/// `GET /v1/organizations/{org}/dashboard-stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub hired_agents_count: u64,
    #[serde(default)]
    pub active_agents_count: u64,
    #[serde(default)]
    pub tasks_this_week: u64,
    #[serde(default)]
    pub avg_response_time_ms: i64,
    #[serde(default)]
    pub avg_quality_score: Option<f64>,
    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_defaults_to_zero() {
        let overview: AnalyticsOverview = serde_json::from_str("{}").unwrap();
        assert_eq!(overview.total_interactions, 0);
        assert_eq!(overview.avg_quality_score, 0.0);
    }

    #[test]
    fn test_peak_day() {
        let report: ActivityReport = serde_json::from_value(serde_json::json!({
            "days": 7,
            "series": [
                {"day": "2026-08-01", "interactions": 3},
                {"day": "2026-08-02", "interactions": 11},
                {"day": "2026-08-03", "interactions": 6}
            ]
        }))
        .unwrap();
        assert_eq!(report.peak_day().unwrap().day, "2026-08-02");

        let empty = ActivityReport::default();
        assert!(empty.peak_day().is_none());
    }

    #[test]
    fn test_dashboard_stats_optional_quality() {
        let stats: DashboardStats = serde_json::from_value(serde_json::json!({
            "hired_agents_count": 4,
            "tasks_this_week": 12,
            "recent_activities": []
        }))
        .unwrap();
        assert_eq!(stats.hired_agents_count, 4);
        assert!(stats.avg_quality_score.is_none());
    }
}

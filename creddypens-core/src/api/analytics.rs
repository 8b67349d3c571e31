//! Read-only analytics and dashboard endpoints.

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::{ActivityReport, AnalyticsOverview, CostReport, DashboardStats};

impl ApiClient {
    /// `GET /v1/organizations/{org}/dashboard-stats`.
    pub async fn dashboard_stats(&self) -> CreddyResult<DashboardStats> {
        let org_id = self.org().require()?;
        self.get_org(&format!("/v1/organizations/{}/dashboard-stats", org_id))
            .await
    }

    /// `GET /v1/organizations/{org}/analytics/overview?days=N`.
    pub async fn analytics_overview(&self, days: u32) -> CreddyResult<AnalyticsOverview> {
        let org_id = self.org().require()?;
        self.get_org(&format!(
            "/v1/organizations/{}/analytics/overview?days={}",
            org_id, days
        ))
        .await
    }

    /// `GET /v1/organizations/{org}/analytics/costs?days=N`.
    pub async fn analytics_costs(&self, days: u32) -> CreddyResult<CostReport> {
        let org_id = self.org().require()?;
        self.get_org(&format!(
            "/v1/organizations/{}/analytics/costs?days={}",
            org_id, days
        ))
        .await
    }

    /// `GET /v1/organizations/{org}/analytics/activity?days=N`.
    pub async fn analytics_activity(&self, days: u32) -> CreddyResult<ActivityReport> {
        let org_id = self.org().require()?;
        self.get_org(&format!(
            "/v1/organizations/{}/analytics/activity?days={}",
            org_id, days
        ))
        .await
    }
}

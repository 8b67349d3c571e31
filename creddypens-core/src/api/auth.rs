//! Session bootstrap. Real authentication is backend-owned; the client
//! only exchanges credentials for an organization id.

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::CreddyResult;

#[derive(Debug, Clone, Serialize)]
pub struct BootstrapRequest {
    pub email: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapResponse {
    pub org_id: String,
    #[serde(default)]
    pub created: bool,
}

impl ApiClient {
    /// `POST /v1/auth/bootstrap` — sign up or sign in, returning the
    /// organization id to persist locally.
    pub async fn auth_bootstrap(
        &self,
        email: &str,
        company_name: Option<&str>,
    ) -> CreddyResult<BootstrapResponse> {
        self.post_json(
            "/v1/auth/bootstrap",
            &BootstrapRequest {
                email: email.to_string(),
                company_name: company_name.map(|s| s.to_string()),
            },
        )
        .await
    }
}

//! Thin typed wrappers over the backend HTTP API.
//!
//! One client, one decoding layer. Org-scoped calls require an
//! authenticated [`OrgContext`] and attach the `X-Org-Id` header; without
//! one they fail with [`CreddyError::SignInRequired`] before any network
//! I/O. Non-2xx responses surface as [`CreddyError::ApiStatus`] with the
//! backend's `{"detail": ...}` message extracted when present. No call in
//! this module retries automatically.

use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CreddyConfig;
use crate::error::{CreddyError, CreddyResult};
use crate::org::OrgContext;

mod academy;
mod agents;
mod analytics;
mod auth;
mod inbox;
mod integrations;
mod memories;
mod skills;
mod streaming;
mod workflows;

pub use auth::{BootstrapRequest, BootstrapResponse};
pub use streaming::AgentStream;

/// Request header carrying the active organization id.
pub const ORG_HEADER: &str = "X-Org-Id";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    org: OrgContext,
    request_timeout: Duration,
}

impl ApiClient {
    /// Build a client from configuration. The per-request timeout applies
    /// to request/response calls only; streaming reads run unbounded.
    pub fn new(config: &CreddyConfig) -> CreddyResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.api.connect_timeout_ms))
            .build()
            .map_err(|e| CreddyError::Internal(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            org: config.org_context(),
            request_timeout: Duration::from_secs(config.api.timeout_secs),
        })
    }

    /// Build a client against an explicit base URL and org context.
    pub fn with_org(base_url: impl Into<String>, org: OrgContext) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            org,
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn org(&self) -> &OrgContext {
        &self.org
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the active organization context (used after login).
    pub fn set_org(&mut self, org: OrgContext) {
        self.org = org;
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `GET` without organization scoping (catalog, health).
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CreddyResult<T> {
        let resp = self
            .http
            .get(self.url(path))
            .timeout(self.request_timeout)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// `GET` with the `X-Org-Id` header; fails fast when signed out.
    pub(crate) async fn get_org<T: DeserializeOwned>(&self, path: &str) -> CreddyResult<T> {
        let org_id = self.org.require()?;
        let resp = self
            .http
            .get(self.url(path))
            .header(ORG_HEADER, org_id)
            .timeout(self.request_timeout)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Org-scoped `POST` with a JSON body.
    pub(crate) async fn post_org<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> CreddyResult<T> {
        let org_id = self.org.require()?;
        let resp = self
            .http
            .post(self.url(path))
            .header(ORG_HEADER, org_id)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Org-scoped `POST` with no body.
    pub(crate) async fn post_org_empty<T: DeserializeOwned>(&self, path: &str) -> CreddyResult<T> {
        let org_id = self.org.require()?;
        let resp = self
            .http
            .post(self.url(path))
            .header(ORG_HEADER, org_id)
            .timeout(self.request_timeout)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Unscoped `POST` with a JSON body (auth bootstrap, director).
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> CreddyResult<T> {
        let resp = self
            .http
            .post(self.url(path))
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Org-scoped `DELETE`.
    pub(crate) async fn delete_org(&self, path: &str) -> CreddyResult<()> {
        let org_id = self.org.require()?;
        let resp = self
            .http
            .delete(self.url(path))
            .header(ORG_HEADER, org_id)
            .timeout(self.request_timeout)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(Self::status_error(resp).await)
    }

    /// `GET /health` — backend reachability probe.
    pub async fn health(&self) -> CreddyResult<serde_json::Value> {
        self.get_json("/health").await
    }

    pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> CreddyResult<T> {
        if !resp.status().is_success() {
            return Err(Self::status_error(resp).await);
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| CreddyError::ApiDecode(e.to_string()))
    }

    /// Convert a non-2xx response into an error, pulling the backend's
    /// `{"detail": ...}` message out of the body when it is there.
    pub(crate) async fn status_error(resp: Response) -> CreddyError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .and_then(|d| d.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    text
                }
            });
        CreddyError::ApiStatus {
            status: status.as_u16(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::with_org("http://localhost:8010/", OrgContext::Unauthenticated);
        assert_eq!(
            client.url("/v1/agents"),
            "http://localhost:8010/v1/agents"
        );
    }

    #[tokio::test]
    async fn test_org_scoped_call_fails_fast_when_signed_out() {
        // Deliberately unroutable address: the call must fail before any
        // network I/O happens.
        let client = ApiClient::with_org("http://127.0.0.1:1", OrgContext::Unauthenticated);
        let err = client
            .get_org::<serde_json::Value>("/v1/organizations/none/agents")
            .await
            .unwrap_err();
        assert!(matches!(err, CreddyError::SignInRequired));
    }
}

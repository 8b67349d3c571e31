//! Organization memory endpoints (settings → memory manager).

use super::ApiClient;
use crate::error::CreddyResult;
use crate::models::{MemoryCreate, MemoryExtractResult, MemoryItem};

impl ApiClient {
    /// `GET /v1/organizations/{org}/memories`.
    pub async fn list_memories(&self) -> CreddyResult<Vec<MemoryItem>> {
        let org_id = self.org().require()?;
        self.get_org(&format!("/v1/organizations/{}/memories", org_id))
            .await
    }

    /// `POST /v1/organizations/{org}/memories`.
    pub async fn create_memory(&self, memory: &MemoryCreate) -> CreddyResult<MemoryItem> {
        let org_id = self.org().require()?;
        self.post_org(&format!("/v1/organizations/{}/memories", org_id), memory)
            .await
    }

    /// `DELETE /v1/memories/{id}`.
    pub async fn delete_memory(&self, memory_id: &str) -> CreddyResult<()> {
        self.delete_org(&format!("/v1/memories/{}", memory_id)).await
    }

    /// `POST /v1/organizations/{org}/memories/extract` — ask the backend to
    /// mine a chat session for new memories.
    pub async fn extract_memories(&self, session_id: &str) -> CreddyResult<MemoryExtractResult> {
        let org_id = self.org().require()?;
        self.post_org(
            &format!("/v1/organizations/{}/memories/extract", org_id),
            &serde_json::json!({ "session_id": session_id }),
        )
        .await
    }
}

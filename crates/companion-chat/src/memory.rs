//! Client for the memory backend used by the memory-editing view.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use companion_core::config::ApiConfig;
use companion_core::UserId;

use crate::error::ChatError;
use crate::transport::http_client;
use crate::types::UserMemory;

#[derive(Debug, Deserialize)]
struct UpdateAck {
    status: String,
}

/// Reads and writes [`UserMemory`] through `GET /memory/{user_id}` and
/// `POST /memory`.
#[derive(Debug, Clone)]
pub struct MemoryClient {
    client: Client,
    base_url: String,
}

impl MemoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let (client, base_url) = http_client(base_url, timeout)?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ChatError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Fetch the stored memory. The backend answers with an empty memory for
    /// unknown users.
    pub async fn fetch(&self, user_id: &UserId) -> Result<UserMemory, ChatError> {
        let url = self.memory_url(user_id)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let text = response.text().await?;
        let memory: UserMemory = serde_json::from_str(&text)?;
        tracing::debug!(%user_id, favorites = memory.favorites.len(), "Memory fetched");
        Ok(memory)
    }

    /// `{base_url}/memory/{user_id}` with the id escaped as one path segment.
    fn memory_url(&self, user_id: &UserId) -> Result<Url, ChatError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ChatError::InvalidConfig(format!("base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ChatError::InvalidConfig(format!("base URL '{}' cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .push("memory")
            .push(user_id.as_str());
        Ok(url)
    }

    /// Replace the stored memory for `memory.user_id`.
    pub async fn update(&self, memory: &UserMemory) -> Result<(), ChatError> {
        let url = format!("{}/memory", self.base_url);
        let response = self.client.post(&url).json(memory).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let text = response.text().await?;
        let ack: UpdateAck = serde_json::from_str(&text)?;
        if ack.status != "success" {
            return Err(ChatError::Rejected(format!("status={}", ack.status)));
        }
        tracing::info!(user_id = %memory.user_id, "Memory updated");
        Ok(())
    }
}

//! Backend reachability probe.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use companion_core::config::ApiConfig;

use crate::error::ChatError;
use crate::transport::http_client;
use crate::types::HealthStatus;

#[derive(Debug, Deserialize)]
struct Banner {
    message: String,
}

/// Calls `GET /health` and `GET /` on the backend.
#[derive(Debug, Clone)]
pub struct HealthProbe {
    client: Client,
    base_url: String,
}

impl HealthProbe {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let (client, base_url) = http_client(base_url, timeout)?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ChatError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub async fn check(&self) -> Result<HealthStatus, ChatError> {
        self.get_json("/health").await
    }

    /// The liveness message served at the backend root.
    pub async fn banner(&self) -> Result<String, ChatError> {
        let banner: Banner = self.get_json("/").await?;
        Ok(banner.message)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ChatError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(serde_json::from_str(&response.text().await?)?)
    }
}

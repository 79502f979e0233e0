//! Chat transport: one request/response exchange per submitted message.
//!
//! Failures never cross this boundary. Network errors, non-success statuses
//! and malformed bodies all resolve to [`FALLBACK_REPLY`], logged once here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use companion_core::config::ApiConfig;
use companion_core::{ConversationMode, UserId};

use crate::error::ChatError;
use crate::types::{ChatReply, ChatRequest};

/// Text shown in place of a response when the exchange fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Request/response exchange with the remote chat endpoint.
///
/// Concurrent calls are independent: no ordering, de-duplication or
/// cancellation across overlapping sends.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `message` and return the reply text, or [`FALLBACK_REPLY`] on any
    /// failure.
    async fn send(&self, user_id: &UserId, mode: ConversationMode, message: &str) -> String;
}

/// Build the shared HTTP client and validate the backend base URL.
pub(crate) fn http_client(base_url: &str, timeout: Duration) -> Result<(Client, String), ChatError> {
    let normalized = base_url.trim().trim_end_matches('/').to_string();
    Url::parse(&normalized)
        .map_err(|e| ChatError::InvalidConfig(format!("base URL '{}': {}", base_url, e)))?;
    let client = Client::builder().timeout(timeout).build()?;
    Ok((client, normalized))
}

/// [`ChatTransport`] over HTTP: `POST {base_url}/chat`.
#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    client: Client,
    base_url: String,
}

impl HttpChatTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let (client, base_url) = http_client(base_url, timeout)?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ChatError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The exchange with failures still visible.
    pub async fn try_send(
        &self,
        user_id: &UserId,
        mode: ConversationMode,
        message: &str,
    ) -> Result<String, ChatError> {
        let url = format!("{}/chat", self.base_url);
        let body = ChatRequest {
            message,
            mode,
            user_id,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let reply: ChatReply = serde_json::from_str(&text)?;
        Ok(reply.response)
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, user_id: &UserId, mode: ConversationMode, message: &str) -> String {
        match self.try_send(user_id, mode, message).await {
            Ok(text) => {
                tracing::debug!(%mode, reply_len = text.len(), "Chat reply received");
                text
            }
            Err(e) => {
                tracing::warn!(error = %e, %mode, "Chat exchange failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

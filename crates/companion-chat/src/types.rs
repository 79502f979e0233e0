//! Wire and exchange types for the chat backend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use companion_core::{ConversationMode, ExchangeId, UserId};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub mode: ConversationMode,
    pub user_id: &'a UserId,
}

/// Successful body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// One submitted message awaiting its response.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub id: ExchangeId,
    pub user_id: UserId,
    pub mode: ConversationMode,
    pub message: String,
    pub pending_since: DateTime<Utc>,
}

impl ChatExchange {
    pub fn new(user_id: UserId, mode: ConversationMode, message: impl Into<String>) -> Self {
        Self {
            id: ExchangeId::new(),
            user_id,
            mode,
            message: message.into(),
            pending_since: Utc::now(),
        }
    }

    /// Pair the exchange with its response text.
    pub fn resolve(self, response_text: String) -> ChatDelivery {
        ChatDelivery {
            exchange_id: self.id,
            mode: self.mode,
            message: self.message,
            response_text,
            pending_since: self.pending_since,
            resolved_at: Utc::now(),
        }
    }
}

/// A resolved exchange as handed to the chat display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatDelivery {
    pub exchange_id: ExchangeId,
    pub mode: ConversationMode,
    pub message: String,
    pub response_text: String,
    pub pending_since: DateTime<Utc>,
    pub resolved_at: DateTime<Utc>,
}

impl ChatDelivery {
    pub fn latency_ms(&self) -> i64 {
        (self.resolved_at - self.pending_since).num_milliseconds()
    }
}

/// What the assistant remembers about a user in personal mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMemory {
    pub user_id: UserId,
    #[serde(default)]
    pub favorites: BTreeMap<String, String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl UserMemory {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            favorites: BTreeMap::new(),
            mood: None,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

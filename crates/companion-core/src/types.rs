use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CompanionError;

// =============================================================================
// Enums
// =============================================================================

/// Conversation mode selected by the user.
///
/// Sent verbatim to the chat endpoint, which picks a different assistant
/// persona for each mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationMode {
    /// Personal companion conversation. The only mode with a memory view.
    #[default]
    Personal,
    /// Tutoring conversation, shown alongside the quiz panel.
    Academy,
}

impl ConversationMode {
    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationMode::Personal => "personal",
            ConversationMode::Academy => "academy",
        }
    }
}

impl fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationMode {
    type Err = CompanionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(ConversationMode::Personal),
            "academy" => Ok(ConversationMode::Academy),
            other => Err(CompanionError::InvalidInput(format!(
                "unknown conversation mode '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Identity of the single user of a session. No authentication is involved.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub const DEFAULT: &'static str = "default-user";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag identifying one submitted chat message and its eventual response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(Uuid);

impl ExchangeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, used when rendering deliveries.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ExchangeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

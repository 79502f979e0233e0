//! Error types for the chat and memory clients.

use companion_core::error::CompanionError;

/// Errors from a single HTTP exchange with the backend.
///
/// The chat transport absorbs these into its fallback reply; the memory and
/// health clients return them to their callers.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChatError::MalformedBody(err.to_string())
        } else if err.is_builder() {
            ChatError::InvalidConfig(err.to_string())
        } else {
            ChatError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::MalformedBody(err.to_string())
    }
}

impl From<ChatError> for CompanionError {
    fn from(err: ChatError) -> Self {
        CompanionError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::InvalidConfig("relative URL".to_string());
        assert_eq!(err.to_string(), "invalid client configuration: relative URL");

        let err = ChatError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = ChatError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned status 500: boom");

        let err = ChatError::MalformedBody("missing field `response`".to_string());
        assert_eq!(
            err.to_string(),
            "malformed response body: missing field `response`"
        );

        let err = ChatError::Rejected("status=failed".to_string());
        assert_eq!(err.to_string(), "backend rejected the request: status=failed");
    }

    #[test]
    fn test_chat_error_from_serde_json() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("<html>");
        let err: ChatError = parsed.unwrap_err().into();
        assert!(matches!(err, ChatError::MalformedBody(_)));
    }

    #[test]
    fn test_chat_error_into_companion_error() {
        let err: CompanionError = ChatError::Network("timeout".to_string()).into();
        assert!(matches!(err, CompanionError::Transport(_)));
        assert!(err.to_string().contains("timeout"));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConversationMode, ExchangeId};

/// Events emitted by the interaction orchestrator after each state change.
///
/// Consumed by the terminal renderer and by the log. They describe what
/// already happened; nothing mutates state in response to them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InteractionEvent {
    // =========================================================================
    // View Events
    // =========================================================================
    /// The conversation mode was set (possibly to the same value).
    ModeChanged {
        from: ConversationMode,
        to: ConversationMode,
        timestamp: DateTime<Utc>,
    },

    /// The memory-editing view was shown or hidden.
    MemoryViewToggled {
        visible: bool,
        timestamp: DateTime<Utc>,
    },

    // =========================================================================
    // Voice Events
    // =========================================================================
    /// Continuous voice capture started.
    VoiceStarted { timestamp: DateTime<Utc> },

    /// Voice capture stopped, either by the user or by the host.
    VoiceStopped { timestamp: DateTime<Utc> },

    /// The live transcript changed.
    TranscriptUpdated {
        transcript: String,
        timestamp: DateTime<Utc>,
    },

    // =========================================================================
    // Chat Events
    // =========================================================================
    /// A message was handed to the chat transport.
    MessageSubmitted {
        exchange_id: ExchangeId,
        mode: ConversationMode,
        timestamp: DateTime<Utc>,
    },

    /// A response (or the fallback text) reached the chat display.
    ResponseDelivered {
        exchange_id: ExchangeId,
        latency_ms: i64,
        timestamp: DateTime<Utc>,
    },
}

impl InteractionEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            InteractionEvent::ModeChanged { timestamp, .. }
            | InteractionEvent::MemoryViewToggled { timestamp, .. }
            | InteractionEvent::VoiceStarted { timestamp }
            | InteractionEvent::VoiceStopped { timestamp }
            | InteractionEvent::TranscriptUpdated { timestamp, .. }
            | InteractionEvent::MessageSubmitted { timestamp, .. }
            | InteractionEvent::ResponseDelivered { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a snake_case event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            InteractionEvent::ModeChanged { .. } => "mode_changed",
            InteractionEvent::MemoryViewToggled { .. } => "memory_view_toggled",
            InteractionEvent::VoiceStarted { .. } => "voice_started",
            InteractionEvent::VoiceStopped { .. } => "voice_stopped",
            InteractionEvent::TranscriptUpdated { .. } => "transcript_updated",
            InteractionEvent::MessageSubmitted { .. } => "message_submitted",
            InteractionEvent::ResponseDelivered { .. } => "response_delivered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = InteractionEvent::VoiceStarted { timestamp: now };
        assert_eq!(event.timestamp(), now);

        let event = InteractionEvent::MessageSubmitted {
            exchange_id: ExchangeId::new(),
            mode: ConversationMode::Academy,
            timestamp: now,
        };
        assert_eq!(event.timestamp(), now);
    }

    #[test]
    fn test_event_name() {
        let now = Utc::now();
        let event = InteractionEvent::ModeChanged {
            from: ConversationMode::Personal,
            to: ConversationMode::Academy,
            timestamp: now,
        };
        assert_eq!(event.event_name(), "mode_changed");

        let event = InteractionEvent::MemoryViewToggled {
            visible: true,
            timestamp: now,
        };
        assert_eq!(event.event_name(), "memory_view_toggled");
    }

    #[test]
    fn test_event_serialization_round_trip() {
        let event = InteractionEvent::ResponseDelivered {
            exchange_id: ExchangeId::new(),
            latency_ms: 120,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ResponseDelivered"));
        let back: InteractionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}

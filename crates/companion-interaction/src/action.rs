use companion_core::ConversationMode;

/// A user-driven input to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    ToggleVoice,
    ChangeMode(ConversationMode),
    /// Show or hide the memory editor. Only offered in personal mode.
    ToggleMemory,
    SubmitMessage(String),
    /// Send the live voice transcript as a message.
    SubmitTranscript,
    Quit,
}

//! The view state that drives rendering.
//!
//! Invariant: `memory_view_visible` implies `mode == Personal`.

use companion_core::ConversationMode;

/// What the front end shows in its content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Memory editor in place of the chat.
    Memory,
    /// Chat alone.
    Chat,
    /// Chat with the quiz panel beside it.
    ChatWithQuiz,
}

/// Mode, memory-view visibility and voice flag.
///
/// Owned by the orchestrator. Everyone else reads copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    mode: ConversationMode,
    memory_view_visible: bool,
    voice_enabled: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ConversationMode::Personal)
    }
}

impl ViewState {
    pub fn new(mode: ConversationMode) -> Self {
        Self {
            mode,
            memory_view_visible: false,
            voice_enabled: false,
        }
    }

    pub fn mode(&self) -> ConversationMode {
        self.mode
    }

    pub fn memory_view_visible(&self) -> bool {
        self.memory_view_visible
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    pub fn snapshot(&self) -> ViewState {
        *self
    }

    pub fn layout(&self) -> Layout {
        match (self.mode, self.memory_view_visible) {
            (ConversationMode::Personal, true) => Layout::Memory,
            (ConversationMode::Personal, false) => Layout::Chat,
            (ConversationMode::Academy, _) => Layout::ChatWithQuiz,
        }
    }

    /// Label of the memory toggle, or `None` when the control is not offered.
    pub fn memory_control_label(&self) -> Option<&'static str> {
        match self.mode {
            ConversationMode::Personal if self.memory_view_visible => Some("Back to Chat"),
            ConversationMode::Personal => Some("Update Memory"),
            ConversationMode::Academy => None,
        }
    }

    pub fn voice_control_label(&self) -> &'static str {
        if self.voice_enabled {
            "Voice On"
        } else {
            "Voice Off"
        }
    }

    /// Flip the memory view. No-op outside personal mode.
    ///
    /// Returns whether anything changed.
    pub(crate) fn toggle_memory_view(&mut self) -> bool {
        if self.mode != ConversationMode::Personal {
            return false;
        }
        self.memory_view_visible = !self.memory_view_visible;
        true
    }

    /// Adopt a newly set mode. Always hides the memory view.
    pub(crate) fn apply_mode(&mut self, mode: ConversationMode) {
        self.mode = mode;
        self.memory_view_visible = false;
    }

    pub(crate) fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
    }
}

//! Conversation mode ownership.

use companion_core::ConversationMode;

use crate::view::ViewState;

/// Holds the selected conversation mode.
///
/// Setting a mode always hides the memory view, even when the mode does not
/// change.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    current: ConversationMode,
}

impl ModeController {
    pub fn new(initial: ConversationMode) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> ConversationMode {
        self.current
    }

    /// Set the mode and push it into `view`. Returns the previous mode.
    pub fn set_mode(&mut self, new_mode: ConversationMode, view: &mut ViewState) -> ConversationMode {
        let previous = self.current;
        self.current = new_mode;
        view.apply_mode(new_mode);
        tracing::debug!(from = %previous, to = %new_mode, "Conversation mode set");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_mode_updates_view() {
        let mut modes = ModeController::default();
        let mut view = ViewState::default();

        let previous = modes.set_mode(ConversationMode::Academy, &mut view);
        assert_eq!(previous, ConversationMode::Personal);
        assert_eq!(modes.current(), ConversationMode::Academy);
        assert_eq!(view.mode(), ConversationMode::Academy);
    }

    #[test]
    fn test_reasserting_mode_still_hides_memory() {
        let mut modes = ModeController::default();
        let mut view = ViewState::default();
        view.toggle_memory_view();
        assert!(view.memory_view_visible());

        modes.set_mode(ConversationMode::Personal, &mut view);
        assert_eq!(view.mode(), ConversationMode::Personal);
        assert!(!view.memory_view_visible());
    }

    #[test]
    fn test_every_mode_sequence_leaves_memory_hidden() {
        let sequence = [
            ConversationMode::Personal,
            ConversationMode::Academy,
            ConversationMode::Academy,
            ConversationMode::Personal,
            ConversationMode::Personal,
        ];
        let mut modes = ModeController::default();
        let mut view = ViewState::default();
        for mode in sequence {
            view.toggle_memory_view();
            modes.set_mode(mode, &mut view);
            assert!(!view.memory_view_visible());
            assert_eq!(view.mode(), modes.current());
        }
    }
}

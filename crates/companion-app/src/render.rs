//! Plain-text rendering for the terminal front end.

use std::io::Write;

use companion_chat::{ChatDelivery, ChatDisplay, ChatLog, UserMemory};
use companion_interaction::{Layout, ViewState};

pub const HELP: &str = "\
Commands:
  /voice               toggle voice input
  /mode <personal|academy>
                       switch conversation mode
  /memory              open or close the memory editor (personal mode)
  /dictate <phrase>    speak a phrase into the microphone
  /say                 send the current transcript
  /status              show the current view
  /help                show this help
  /quit                leave
Anything else is sent as a chat message.
In the memory editor: show, fav <thing> <favorite>, unfav <thing>,
mood [text], save, reload.";

const QUIZ_PANEL: &str = "\
+-- Quiz ---------------------------+
| Test what you learned today.      |
| Ask: \"quiz me on <topic>\"         |
+-----------------------------------+";

/// Header line plus the content area for the current layout.
pub fn render_view(view: &ViewState) -> String {
    let mut out = format!("[{}] [{}]", view.mode(), view.voice_control_label());
    if let Some(label) = view.memory_control_label() {
        out.push_str(&format!(" [{}]", label));
    }
    match view.layout() {
        Layout::Chat => {}
        Layout::Memory => out.push_str("\n-- memory editor (type 'show' to list) --"),
        Layout::ChatWithQuiz => {
            out.push('\n');
            out.push_str(QUIZ_PANEL);
        }
    }
    out
}

pub fn format_delivery(delivery: &ChatDelivery) -> String {
    format!(
        "[#{}] assistant: {}",
        delivery.exchange_id.short(),
        delivery.response_text
    )
}

pub fn format_memory(memory: &UserMemory, dirty: bool) -> String {
    let mut out = format!("memory for {}", memory.user_id);
    if dirty {
        out.push_str(" (unsaved)");
    }
    if memory.favorites.is_empty() {
        out.push_str("\n  no favorites");
    }
    for (key, value) in &memory.favorites {
        out.push_str(&format!("\n  favorite {}: {}", key, value));
    }
    match memory.mood.as_deref() {
        Some(mood) => out.push_str(&format!("\n  mood: {}", mood)),
        None => out.push_str("\n  mood: -"),
    }
    out
}

/// Prints deliveries as they arrive and keeps the history.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    log: ChatLog,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }
}

impl ChatDisplay for TerminalDisplay {
    fn deliver(&mut self, delivery: ChatDelivery) {
        let line = format_delivery(&delivery);
        let mut stdout = std::io::stdout().lock();
        // A closed stdout only loses the echo; the log still records it.
        let _ = writeln!(stdout, "{}", line);
        let _ = stdout.flush();
        self.log.deliver(delivery);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_chat::ChatExchange;
    use companion_core::{ConversationMode, UserId};

    #[test]
    fn test_render_personal_chat() {
        let view = ViewState::new(ConversationMode::Personal);
        assert_eq!(render_view(&view), "[personal] [Voice Off] [Update Memory]");
    }

    #[test]
    fn test_render_academy_shows_quiz_and_no_memory_control() {
        let view = ViewState::new(ConversationMode::Academy);
        let out = render_view(&view);
        assert!(out.starts_with("[academy] [Voice Off]\n"));
        assert!(out.contains("Quiz"));
        assert!(!out.contains("Memory"));
    }

    #[test]
    fn test_format_delivery_uses_short_id() {
        let exchange = ChatExchange::new(UserId::default(), ConversationMode::Personal, "hi");
        let short = exchange.id.short();
        let delivery = exchange.resolve("hello!".to_string());
        assert_eq!(
            format_delivery(&delivery),
            format!("[#{}] assistant: hello!", short)
        );
    }

    #[test]
    fn test_format_memory() {
        let mut memory = UserMemory::empty(UserId::default());
        assert!(format_memory(&memory, false).contains("no favorites"));

        memory.favorites.insert("song".to_string(), "Kesariya".to_string());
        memory.mood = Some("happy".to_string());
        let out = format_memory(&memory, true);
        assert!(out.starts_with("memory for default-user (unsaved)"));
        assert!(out.contains("favorite song: Kesariya"));
        assert!(out.contains("mood: happy"));
    }

    #[test]
    fn test_terminal_display_records_history() {
        let mut display = TerminalDisplay::new();
        let exchange = ChatExchange::new(UserId::default(), ConversationMode::Academy, "q");
        let id = exchange.id;
        display.deliver(exchange.resolve("a".to_string()));
        assert_eq!(display.log().len(), 1);
        assert!(display.log().find(id).is_some());
    }
}

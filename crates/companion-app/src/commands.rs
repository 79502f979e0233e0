//! Parsing of terminal input lines.
//!
//! Lines starting with `/` are controls. Everything else is either a chat
//! message or, while the memory view is open, a memory-editor command.

use companion_core::{CompanionError, ConversationMode};
use companion_interaction::UserAction;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(UserAction),
    /// Feed a phrase to the in-process speech capability.
    Dictate(String),
    Memory(MemoryCommand),
    Status,
    Help,
    Empty,
}

/// Edits applied by the memory editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryCommand {
    Show,
    Favorite { key: String, value: String },
    Unfavorite(String),
    Mood(String),
    ClearMood,
    Save,
    Reload,
}

/// Parse a line typed by the user.
pub fn parse(line: &str, memory_view_visible: bool) -> Result<Command, CompanionError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    if let Some(control) = line.strip_prefix('/') {
        let (name, rest) = split_word(control);
        return match name {
            "voice" => Ok(Command::Action(UserAction::ToggleVoice)),
            "mode" => {
                let mode: ConversationMode = rest.parse()?;
                Ok(Command::Action(UserAction::ChangeMode(mode)))
            }
            "memory" => Ok(Command::Action(UserAction::ToggleMemory)),
            "say" => Ok(Command::Action(UserAction::SubmitTranscript)),
            "dictate" if !rest.is_empty() => Ok(Command::Dictate(rest.to_string())),
            "dictate" => Err(CompanionError::InvalidInput(
                "usage: /dictate <phrase>".to_string(),
            )),
            "status" => Ok(Command::Status),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Action(UserAction::Quit)),
            other => Err(CompanionError::InvalidInput(format!(
                "unknown command '/{}', try /help",
                other
            ))),
        };
    }

    if memory_view_visible {
        return parse_memory(line).map(Command::Memory);
    }

    Ok(Command::Action(UserAction::SubmitMessage(line.to_string())))
}

fn parse_memory(line: &str) -> Result<MemoryCommand, CompanionError> {
    let (name, rest) = split_word(line);
    match name {
        "show" => Ok(MemoryCommand::Show),
        "save" => Ok(MemoryCommand::Save),
        "reload" => Ok(MemoryCommand::Reload),
        "fav" => {
            let (key, value) = split_word(rest);
            if key.is_empty() || value.is_empty() {
                return Err(CompanionError::InvalidInput(
                    "usage: fav <thing> <favorite>".to_string(),
                ));
            }
            Ok(MemoryCommand::Favorite {
                key: key.to_string(),
                value: value.to_string(),
            })
        }
        "unfav" if !rest.is_empty() => Ok(MemoryCommand::Unfavorite(rest.to_string())),
        "mood" if rest.is_empty() => Ok(MemoryCommand::ClearMood),
        "mood" => Ok(MemoryCommand::Mood(rest.to_string())),
        _ => Err(CompanionError::InvalidInput(format!(
            "unknown memory command '{}', try: show, fav, unfav, mood, save, reload",
            line
        ))),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            parse("  hello there ", false).unwrap(),
            Command::Action(UserAction::SubmitMessage("hello there".to_string()))
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   ", false).unwrap(), Command::Empty);
    }

    #[test]
    fn test_controls() {
        assert_eq!(
            parse("/voice", false).unwrap(),
            Command::Action(UserAction::ToggleVoice)
        );
        assert_eq!(
            parse("/memory", true).unwrap(),
            Command::Action(UserAction::ToggleMemory)
        );
        assert_eq!(
            parse("/say", false).unwrap(),
            Command::Action(UserAction::SubmitTranscript)
        );
        assert_eq!(parse("/status", false).unwrap(), Command::Status);
        assert_eq!(parse("/help", false).unwrap(), Command::Help);
        assert_eq!(
            parse("/exit", false).unwrap(),
            Command::Action(UserAction::Quit)
        );
    }

    #[test]
    fn test_mode_control() {
        assert_eq!(
            parse("/mode Academy", false).unwrap(),
            Command::Action(UserAction::ChangeMode(ConversationMode::Academy))
        );
        assert!(parse("/mode", false).is_err());
        assert!(parse("/mode romance", false).is_err());
    }

    #[test]
    fn test_dictate_requires_phrase() {
        assert_eq!(
            parse("/dictate what is a prime number", false).unwrap(),
            Command::Dictate("what is a prime number".to_string())
        );
        assert!(parse("/dictate", false).is_err());
    }

    #[test]
    fn test_unknown_control() {
        let err = parse("/dance", false).unwrap_err();
        assert!(err.to_string().contains("/dance"));
    }

    #[test]
    fn test_memory_view_routes_text_to_editor() {
        assert_eq!(
            parse("fav food pani puri", true).unwrap(),
            Command::Memory(MemoryCommand::Favorite {
                key: "food".to_string(),
                value: "pani puri".to_string(),
            })
        );
        assert_eq!(
            parse("unfav food", true).unwrap(),
            Command::Memory(MemoryCommand::Unfavorite("food".to_string()))
        );
        assert_eq!(
            parse("mood sleepy", true).unwrap(),
            Command::Memory(MemoryCommand::Mood("sleepy".to_string()))
        );
        assert_eq!(
            parse("mood", true).unwrap(),
            Command::Memory(MemoryCommand::ClearMood)
        );
        assert_eq!(parse("save", true).unwrap(), Command::Memory(MemoryCommand::Save));
        assert!(parse("fav food", true).is_err());
        assert!(parse("hello", true).is_err());
    }
}

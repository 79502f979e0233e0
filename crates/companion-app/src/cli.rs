//! CLI argument definitions for the Companion client.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use companion_core::config::CompanionConfig;
use companion_core::{ConversationMode, UserId};

/// Companion: a two-mode conversational assistant with optional voice input.
#[derive(Parser, Debug, Default)]
#[command(name = "companion", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the chat backend.
    #[arg(short = 'u', long = "api-url")]
    pub api_url: Option<String>,

    /// User identifier sent with every request.
    #[arg(long = "user")]
    pub user_id: Option<String>,

    /// Mode to start in (personal or academy).
    #[arg(short = 'm', long = "mode")]
    pub mode: Option<ConversationMode>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Disable voice input for this session.
    #[arg(long = "no-voice")]
    pub no_voice: bool,

    /// Probe the backend health endpoint and exit.
    #[arg(long = "check")]
    pub check: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > COMPANION_CONFIG env var > ~/.companion/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("COMPANION_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Apply env and CLI overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut CompanionConfig) {
        config.apply_env_overrides();
        self.apply_flags(config);
    }

    fn apply_flags(&self, config: &mut CompanionConfig) {
        if let Some(ref url) = self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(ref user) = self.user_id {
            config.session.user_id = UserId::new(user.clone());
        }
        if let Some(mode) = self.mode {
            config.session.initial_mode = mode;
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        if self.no_voice {
            config.voice.enabled = false;
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".companion").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".companion").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "companion",
            "--api-url",
            "http://backend:8000",
            "--mode",
            "academy",
            "--user",
            "riya",
            "--no-voice",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("http://backend:8000"));
        assert_eq!(args.mode, Some(ConversationMode::Academy));
        assert_eq!(args.user_id.as_deref(), Some("riya"));
        assert!(args.no_voice);
        assert!(!args.check);
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let result = CliArgs::try_parse_from(["companion", "--mode", "romance"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs {
            api_url: Some("http://flag:1".to_string()),
            user_id: Some("flag-user".to_string()),
            mode: Some(ConversationMode::Academy),
            log_level: Some("debug".to_string()),
            no_voice: true,
            ..Default::default()
        };
        let mut config = CompanionConfig::default();
        args.apply_flags(&mut config);

        assert_eq!(config.api.base_url, "http://flag:1");
        assert_eq!(config.session.user_id.as_str(), "flag-user");
        assert_eq!(config.session.initial_mode, ConversationMode::Academy);
        assert_eq!(config.general.log_level, "debug");
        assert!(!config.voice.enabled);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = CliArgs::default();
        let mut config = CompanionConfig::default();
        config.api.base_url = "http://file:2".to_string();
        args.apply_flags(&mut config);
        assert_eq!(config.api.base_url, "http://file:2");
        assert!(config.voice.enabled);
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let args = CliArgs {
            config: Some(PathBuf::from("/tmp/companion.toml")),
            ..Default::default()
        };
        assert_eq!(
            args.resolve_config_path(),
            PathBuf::from("/tmp/companion.toml")
        );
    }
}

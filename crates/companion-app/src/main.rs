//! Companion terminal client - composition root.
//!
//! 1. Resolve configuration (CLI > env > TOML file > defaults)
//! 2. Probe the backend health endpoint
//! 3. Build the chat transport, memory client and voice capability
//! 4. Drive the interaction orchestrator from stdin until `/quit` or EOF

mod cli;
mod commands;
mod memory_editor;
mod render;

use std::ops::ControlFlow;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use companion_chat::{HealthProbe, HttpChatTransport, MemoryClient};
use companion_core::config::CompanionConfig;
use companion_interaction::{Background, InteractionOrchestrator, UserAction};
use companion_voice::{
    CaptureEvent, DictationFeed, ManualCapability, UnavailableCapability, VoiceCaptureAdapter,
};

use cli::CliArgs;
use commands::Command;
use memory_editor::MemoryEditor;
use render::TerminalDisplay;

type Orchestrator = InteractionOrchestrator<TerminalDisplay>;

/// State the terminal keeps next to the orchestrator.
struct Frontend {
    editor: MemoryEditor,
    feed: Option<DictationFeed>,
}

impl Frontend {
    async fn handle_line(&mut self, orch: &mut Orchestrator, line: &str) -> ControlFlow<()> {
        let command = match commands::parse(line, orch.view().memory_view_visible()) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                return ControlFlow::Continue(());
            }
        };

        match command {
            Command::Empty => {}
            Command::Help => println!("{}", render::HELP),
            Command::Status => {
                println!("{}", render::render_view(&orch.view()));
                if orch.view().voice_enabled() {
                    println!("transcript: {}", orch.voice().transcript());
                }
                println!("awaiting replies: {}", orch.in_flight());
            }
            Command::Dictate(phrase) => match &self.feed {
                None => println!("voice input is disabled"),
                Some(feed) => {
                    if !feed.dictate(&phrase) {
                        println!("voice is off, use /voice first");
                    }
                }
            },
            Command::Memory(memory_command) => {
                println!("{}", self.editor.execute(memory_command).await);
            }
            Command::Action(UserAction::SubmitMessage(text)) => {
                if let Some(id) = orch.submit_message(&text) {
                    println!("[#{}] sent", id.short());
                }
            }
            Command::Action(UserAction::SubmitTranscript) => {
                if !orch.view().voice_enabled() {
                    println!("voice is off");
                } else if let Some(id) = orch.submit_transcript() {
                    println!("[#{}] sent", id.short());
                } else {
                    println!("nothing heard yet");
                }
            }
            Command::Action(action) => {
                let before = orch.view();
                if orch.handle(action.clone()).is_break() {
                    return ControlFlow::Break(());
                }
                let after = orch.view();
                if action == UserAction::ToggleVoice && before == after {
                    println!("voice input is not available");
                }
                println!("{}", render::render_view(&after));
                if after.memory_view_visible() && !before.memory_view_visible() {
                    match self.editor.open().await {
                        Ok(()) => println!("{}", render::format_memory(self.editor.draft(), false)),
                        Err(e) => {
                            tracing::warn!(error = %e, "Memory fetch failed");
                            println!("could not load memory: {}", e);
                        }
                    }
                }
                if before.memory_view_visible()
                    && !after.memory_view_visible()
                    && self.editor.is_dirty()
                {
                    println!("memory has unsaved edits");
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn show_background(&self, orch: &Orchestrator, background: Background) {
        match background {
            // Already printed by the display.
            Background::Delivered(_) => {}
            Background::Voice(CaptureEvent::Transcript(transcript)) => {
                println!("(heard) {}  [/say to send]", transcript);
            }
            Background::Voice(CaptureEvent::Ended) => {
                println!("{}", render::render_view(&orch.view()));
            }
        }
    }
}

fn build_voice(config: &CompanionConfig) -> (VoiceCaptureAdapter, Option<DictationFeed>) {
    if config.voice.enabled {
        let (capability, feed) = ManualCapability::new();
        (VoiceCaptureAdapter::new(Box::new(capability)), Some(feed))
    } else {
        tracing::info!("Voice input disabled");
        (VoiceCaptureAdapter::new(Box::new(UnavailableCapability)), None)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = CompanionConfig::load_or_default(&config_file);
    args.apply_overrides(&mut config);

    // Tracing. Stdout belongs to the conversation.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Companion v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), base_url = %config.api.base_url, "Configuration loaded");

    // Backend health.
    let probe = HealthProbe::from_config(&config.api)?;
    match probe.check().await {
        Ok(health) if health.is_healthy() => {
            tracing::info!("Backend healthy");
            if args.check {
                println!("backend at {} is healthy", config.api.base_url);
                match probe.banner().await {
                    Ok(message) => println!("{}", message),
                    Err(e) => tracing::debug!(error = %e, "No banner at backend root"),
                }
                return Ok(());
            }
        }
        Ok(health) => {
            tracing::warn!(status = %health.status, "Backend reports unexpected status");
            if args.check {
                return Err(format!("backend status: {}", health.status).into());
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Backend unreachable, replies will fall back");
            if args.check {
                return Err(e.into());
            }
        }
    }

    // Collaborators.
    let transport = Arc::new(HttpChatTransport::from_config(&config.api)?);
    let memory = MemoryClient::from_config(&config.api)?;
    let (voice, feed) = build_voice(&config);
    let user_id = config.session.user_id.clone();

    let mut orch = InteractionOrchestrator::new(
        user_id.clone(),
        config.session.initial_mode,
        voice,
        transport,
        TerminalDisplay::new(),
    )
    .with_continuous(config.voice.continuous);

    let mut frontend = Frontend {
        editor: MemoryEditor::new(memory, user_id),
        feed,
    };

    println!("{}", render::render_view(&orch.view()));
    println!("type /help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if frontend.handle_line(&mut orch, &line).await.is_break() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    break;
                }
            },
            background = orch.next_background() => frontend.show_background(&orch, background),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    let display = orch.shutdown().await;
    let exchanges = display.log().len();
    tracing::info!(exchanges, "Companion stopped");
    Ok(())
}

//! Interaction orchestrator: the top-level state machine.
//!
//! Voice states are `OFF (voice_enabled=false, listening=false)` and
//! `ON (true, true)`. Every user action is applied in one `&mut self` call, so
//! no intermediate state is observable. Chat sends run on spawned tasks and
//! come back through a channel drained by the same loop that handles user
//! actions and voice events.

use std::ops::ControlFlow;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc};

use companion_chat::{ChatDelivery, ChatDisplay, ChatExchange, ChatTransport, FALLBACK_REPLY};
use companion_core::{ConversationMode, ExchangeId, InteractionEvent, UserId};
use companion_voice::{CaptureEvent, VoiceCaptureAdapter};

use crate::action::UserAction;
use crate::mode::ModeController;
use crate::view::ViewState;

/// Something the orchestrator applied without a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// A chat response reached the display.
    Delivered(ExchangeId),
    /// A voice capture update was applied.
    Voice(CaptureEvent),
}

/// An exchange whose send task is running.
///
/// Always produces exactly one completion: the reply on success, or
/// [`FALLBACK_REPLY`] if the task unwinds before a reply arrives.
struct PendingExchange {
    exchange: Option<ChatExchange>,
    completions: mpsc::UnboundedSender<ChatDelivery>,
}

impl PendingExchange {
    fn resolve(mut self, text: String) {
        if let Some(exchange) = self.exchange.take() {
            // The receiver lives as long as the orchestrator.
            let _ = self.completions.send(exchange.resolve(text));
        }
    }
}

impl Drop for PendingExchange {
    fn drop(&mut self) {
        if let Some(exchange) = self.exchange.take() {
            tracing::warn!(exchange_id = %exchange.id, "Chat send aborted, using fallback reply");
            let _ = self
                .completions
                .send(exchange.resolve(FALLBACK_REPLY.to_string()));
        }
    }
}

/// Capacity of the interaction event broadcast.
const EVENT_CAPACITY: usize = 64;

/// Wires user actions to the mode controller, view state, voice adapter and
/// chat transport.
pub struct InteractionOrchestrator<D: ChatDisplay> {
    user_id: UserId,
    modes: ModeController,
    view: ViewState,
    voice: VoiceCaptureAdapter,
    continuous: bool,
    transport: Arc<dyn ChatTransport>,
    display: D,
    completions_tx: mpsc::UnboundedSender<ChatDelivery>,
    completions_rx: mpsc::UnboundedReceiver<ChatDelivery>,
    in_flight: usize,
    events: broadcast::Sender<InteractionEvent>,
}

impl<D: ChatDisplay> InteractionOrchestrator<D> {
    pub fn new(
        user_id: UserId,
        initial_mode: ConversationMode,
        voice: VoiceCaptureAdapter,
        transport: Arc<dyn ChatTransport>,
        display: D,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            user_id,
            modes: ModeController::new(initial_mode),
            view: ViewState::new(initial_mode),
            voice,
            continuous: true,
            transport,
            display,
            completions_tx,
            completions_rx,
            in_flight: 0,
            events,
        }
    }

    /// Whether voice capture keeps running across pauses. Defaults to `true`.
    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InteractionEvent> {
        self.events.subscribe()
    }

    pub fn view(&self) -> ViewState {
        self.view.snapshot()
    }

    pub fn voice(&self) -> &VoiceCaptureAdapter {
        &self.voice
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Number of submitted messages whose response has not been delivered.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// OFF -> ON starts capture; ON -> OFF stops it.
    ///
    /// `voice_enabled` is taken from the adapter afterwards, so a capability
    /// that refuses to start leaves the state OFF.
    pub fn toggle_voice(&mut self) {
        let was_enabled = self.view.voice_enabled();
        if was_enabled {
            self.voice.stop();
        } else {
            self.voice.start(self.continuous);
        }
        let enabled = self.voice.is_listening();
        self.view.set_voice_enabled(enabled);

        let timestamp = Utc::now();
        match (was_enabled, enabled) {
            (false, true) => self.emit(InteractionEvent::VoiceStarted { timestamp }),
            (true, false) => self.emit(InteractionEvent::VoiceStopped { timestamp }),
            _ => tracing::info!("Voice toggle had no effect; speech capability unavailable"),
        }
        self.debug_check_invariants();
    }

    /// Set the conversation mode. Hides the memory view; voice is untouched.
    pub fn change_mode(&mut self, new_mode: ConversationMode) {
        let previous = self.modes.set_mode(new_mode, &mut self.view);
        self.emit(InteractionEvent::ModeChanged {
            from: previous,
            to: new_mode,
            timestamp: Utc::now(),
        });
        self.debug_check_invariants();
    }

    /// Show or hide the memory editor. Ignored in academy mode.
    pub fn toggle_memory(&mut self) {
        if self.view.toggle_memory_view() {
            self.emit(InteractionEvent::MemoryViewToggled {
                visible: self.view.memory_view_visible(),
                timestamp: Utc::now(),
            });
        } else {
            tracing::debug!(mode = %self.view.mode(), "Memory view not available in this mode");
        }
        self.debug_check_invariants();
    }

    /// Send `text` to the chat transport in the current mode.
    ///
    /// Returns the tag the eventual delivery will carry, or `None` for a blank
    /// message. Must be called within a tokio runtime.
    pub fn submit_message(&mut self, text: &str) -> Option<ExchangeId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let exchange = ChatExchange::new(self.user_id.clone(), self.view.mode(), text);
        let exchange_id = exchange.id;
        tracing::info!(
            exchange_id = %exchange_id,
            mode = %exchange.mode,
            message_len = text.len(),
            "Message submitted"
        );
        self.emit(InteractionEvent::MessageSubmitted {
            exchange_id,
            mode: exchange.mode,
            timestamp: exchange.pending_since,
        });

        let transport = Arc::clone(&self.transport);
        let user_id = exchange.user_id.clone();
        let mode = exchange.mode;
        let message = exchange.message.clone();
        let pending = PendingExchange {
            exchange: Some(exchange),
            completions: self.completions_tx.clone(),
        };
        self.in_flight += 1;
        tokio::spawn(async move {
            let text = transport.send(&user_id, mode, &message).await;
            pending.resolve(text);
        });

        Some(exchange_id)
    }

    /// Send the live transcript as a message and clear it.
    ///
    /// Only while voice is on and the transcript is not blank.
    pub fn submit_transcript(&mut self) -> Option<ExchangeId> {
        if !self.view.voice_enabled() {
            return None;
        }
        let transcript = self.voice.transcript().trim().to_string();
        if transcript.is_empty() {
            return None;
        }
        self.voice.reset_transcript();
        self.submit_message(&transcript)
    }

    /// Apply one user action. `Break` on [`UserAction::Quit`].
    pub fn handle(&mut self, action: UserAction) -> ControlFlow<()> {
        match action {
            UserAction::ToggleVoice => self.toggle_voice(),
            UserAction::ChangeMode(mode) => self.change_mode(mode),
            UserAction::ToggleMemory => self.toggle_memory(),
            UserAction::SubmitMessage(text) => {
                self.submit_message(&text);
            }
            UserAction::SubmitTranscript => {
                self.submit_transcript();
            }
            UserAction::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Apply an event that the voice adapter already folded into its session.
    pub fn handle_voice_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Transcript(transcript) => {
                self.emit(InteractionEvent::TranscriptUpdated {
                    transcript,
                    timestamp: Utc::now(),
                });
            }
            CaptureEvent::Ended => {
                if self.view.voice_enabled() {
                    self.view.set_voice_enabled(false);
                    self.emit(InteractionEvent::VoiceStopped {
                        timestamp: Utc::now(),
                    });
                }
            }
        }
        self.debug_check_invariants();
    }

    /// Hand a resolved exchange to the display.
    fn deliver(&mut self, delivery: ChatDelivery) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let exchange_id = delivery.exchange_id;
        let latency_ms = delivery.latency_ms();
        tracing::info!(exchange_id = %exchange_id, latency_ms, "Response delivered");
        self.display.deliver(delivery);
        self.emit(InteractionEvent::ResponseDelivered {
            exchange_id,
            latency_ms,
            timestamp: Utc::now(),
        });
    }

    // =========================================================================
    // Event loop
    // =========================================================================

    /// Wait for the next chat completion and deliver it.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn deliver_next(&mut self) -> Option<ExchangeId> {
        if self.in_flight == 0 {
            return None;
        }
        let delivery = self.completions_rx.recv().await?;
        let exchange_id = delivery.exchange_id;
        self.deliver(delivery);
        Some(exchange_id)
    }

    /// Apply all voice events already queued by the capability.
    pub fn pump_voice(&mut self) {
        while let Some(event) = self.voice.try_next_event() {
            self.handle_voice_event(event);
        }
    }

    /// Wait for the next chat completion or voice event and apply it.
    ///
    /// Cancel-safe, so it can race user input in a `select!`.
    pub async fn next_background(&mut self) -> Background {
        tokio::select! {
            Some(delivery) = self.completions_rx.recv() => {
                let exchange_id = delivery.exchange_id;
                self.deliver(delivery);
                Background::Delivered(exchange_id)
            }
            event = self.voice.next_event() => {
                self.handle_voice_event(event.clone());
                Background::Voice(event)
            }
        }
    }

    /// Process user actions, voice events and chat completions until `Quit`
    /// or until the action channel closes, then shut down.
    pub async fn run(mut self, mut actions: mpsc::Receiver<UserAction>) -> D {
        tracing::info!(user_id = %self.user_id, mode = %self.view.mode(), "Interaction loop started");
        loop {
            tokio::select! {
                action = actions.recv() => match action {
                    Some(action) => {
                        if self.handle(action).is_break() {
                            break;
                        }
                    }
                    None => break,
                },
                _ = self.next_background() => {}
            }
        }
        self.shutdown().await
    }

    /// Stop voice capture, wait for in-flight exchanges to be delivered, and
    /// return the display so the caller can inspect the final history.
    pub async fn shutdown(mut self) -> D {
        if self.voice.is_listening() {
            self.voice.stop();
            self.view.set_voice_enabled(false);
        }
        while self.in_flight > 0 {
            if self.deliver_next().await.is_none() {
                break;
            }
        }
        tracing::info!("Interaction loop finished");
        self.display
    }

    fn emit(&self, event: InteractionEvent) {
        tracing::trace!(event = event.event_name(), "Interaction event");
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn debug_check_invariants(&self) {
        debug_assert_eq!(self.view.mode(), self.modes.current());
        debug_assert!(
            !self.view.memory_view_visible() || self.view.mode() == ConversationMode::Personal
        );
        debug_assert_eq!(self.view.voice_enabled(), self.voice.is_listening());
    }
}

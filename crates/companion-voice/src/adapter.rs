//! Voice capture adapter.
//!
//! Wraps a [`SpeechCapability`] and keeps a [`VoiceSession`] in step with it.
//! Start and stop are idempotent from the caller's side: a redundant call
//! never reaches the capability. A capability that refuses to start is logged
//! and otherwise ignored, leaving the session idle.

use std::future;

use tokio::sync::mpsc;

use crate::capability::{CaptureEvent, SpeechCapability};
use crate::state::VoiceSession;

pub struct VoiceCaptureAdapter {
    capability: Box<dyn SpeechCapability>,
    session: VoiceSession,
    events: Option<mpsc::UnboundedReceiver<CaptureEvent>>,
}

impl std::fmt::Debug for VoiceCaptureAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceCaptureAdapter")
            .field("session", &self.session)
            .field("subscribed", &self.events.is_some())
            .finish()
    }
}

impl VoiceCaptureAdapter {
    /// Wrap a capability and subscribe to its events.
    pub fn new(mut capability: Box<dyn SpeechCapability>) -> Self {
        let events = capability.subscribe();
        Self {
            capability,
            session: VoiceSession::new(),
            events,
        }
    }

    /// Begin capture. No-op if already listening.
    pub fn start(&mut self, continuous: bool) {
        if self.session.is_active() {
            tracing::debug!("Voice capture already running, start ignored");
            return;
        }
        self.discard_queued_events();
        match self.capability.start(continuous) {
            Ok(()) if self.capability.is_listening() => {
                self.session.begin();
                tracing::info!(continuous, "Voice capture started");
            }
            Ok(()) => {
                tracing::warn!("Speech capability accepted start but is not listening");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Voice capture could not start");
            }
        }
    }

    /// End capture. No-op if not listening.
    pub fn stop(&mut self) {
        if !self.session.is_active() {
            tracing::debug!("Voice capture not running, stop ignored");
            return;
        }
        if let Err(e) = self.capability.stop() {
            tracing::warn!(error = %e, "Speech capability reported an error on stop");
        }
        self.session.end();
        tracing::info!("Voice capture stopped");
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_active()
    }

    pub fn transcript(&self) -> &str {
        self.session.live_transcript()
    }

    pub fn session(&self) -> &VoiceSession {
        &self.session
    }

    /// Clear the live transcript without stopping capture.
    pub fn reset_transcript(&mut self) {
        self.session.clear_transcript();
    }

    /// Wait for the next capability event that changes the session, apply it,
    /// and return it.
    ///
    /// Stale events (arriving after capture stopped) are dropped. Pending
    /// forever once the capability has no event stream. Cancel-safe.
    pub async fn next_event(&mut self) -> CaptureEvent {
        loop {
            let received = match self.events.as_mut() {
                Some(rx) => rx.recv().await,
                None => future::pending().await,
            };
            match received {
                Some(event) => {
                    if self.apply(&event) {
                        return event;
                    }
                }
                None => {
                    tracing::debug!("Speech capability event stream closed");
                    self.events = None;
                }
            }
        }
    }

    /// Apply the next already-queued event that changes the session, if any.
    pub fn try_next_event(&mut self) -> Option<CaptureEvent> {
        loop {
            let event = self.events.as_mut()?.try_recv().ok()?;
            if self.apply(&event) {
                return Some(event);
            }
        }
    }

    /// Drop events left over from an earlier session. Everything queued
    /// before the capability starts again belongs to a capture that is over.
    fn discard_queued_events(&mut self) {
        let Some(rx) = self.events.as_mut() else {
            return;
        };
        let mut discarded = 0usize;
        while rx.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            tracing::debug!(discarded, "Dropped capture events from a previous session");
        }
    }

    fn apply(&mut self, event: &CaptureEvent) -> bool {
        match event {
            CaptureEvent::Transcript(text) => self.session.replace_transcript(text.clone()),
            CaptureEvent::Ended => {
                let ended = self.session.end();
                if ended {
                    tracing::info!("Voice capture ended by host");
                }
                ended
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

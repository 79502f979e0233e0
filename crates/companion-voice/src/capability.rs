//! Host speech capabilities.
//!
//! A capability turns speech into a running transcript. Its recognition
//! algorithm is opaque; the adapter only starts it, stops it, and listens to
//! the events it publishes.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::error::VoiceError;

/// Update published by a capability while it is capturing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Full transcript so far. Replaces the previous reading.
    Transcript(String),
    /// The host stopped capturing on its own.
    Ended,
}

/// A host-provided continuous speech-to-text capability.
pub trait SpeechCapability: Send {
    /// Begin capturing. `continuous` keeps capture running across pauses.
    fn start(&mut self, continuous: bool) -> Result<(), VoiceError>;

    /// End capturing.
    fn stop(&mut self) -> Result<(), VoiceError>;

    /// Whether the host reports capture as running.
    fn is_listening(&self) -> bool;

    /// Take the event stream. Called once by the adapter; later calls may
    /// return `None`.
    fn subscribe(&mut self) -> Option<mpsc::UnboundedReceiver<CaptureEvent>>;
}

// =============================================================================
// UnavailableCapability
// =============================================================================

/// Capability for hosts without speech support. Every start is refused.
#[derive(Debug, Default)]
pub struct UnavailableCapability;

impl SpeechCapability for UnavailableCapability {
    fn start(&mut self, _continuous: bool) -> Result<(), VoiceError> {
        Err(VoiceError::Unavailable(
            "speech recognition is not supported by this host".to_string(),
        ))
    }

    fn stop(&mut self) -> Result<(), VoiceError> {
        Ok(())
    }

    fn is_listening(&self) -> bool {
        false
    }

    fn subscribe(&mut self) -> Option<mpsc::UnboundedReceiver<CaptureEvent>> {
        None
    }
}

// =============================================================================
// ManualCapability
// =============================================================================

#[derive(Debug, Default)]
struct ManualState {
    listening: bool,
    continuous: bool,
    transcript: String,
}

/// In-process capability whose speech arrives as text through a
/// [`DictationFeed`].
///
/// Phrases fed while listening are appended to the transcript. When started
/// without `continuous`, capture ends after the first phrase.
#[derive(Debug)]
pub struct ManualCapability {
    state: Arc<Mutex<ManualState>>,
    events_rx: Option<mpsc::UnboundedReceiver<CaptureEvent>>,
}

/// Handle used by the host front end to feed recognized phrases.
#[derive(Debug, Clone)]
pub struct DictationFeed {
    state: Arc<Mutex<ManualState>>,
    events_tx: mpsc::UnboundedSender<CaptureEvent>,
}

impl ManualCapability {
    /// Create a capability together with the feed that drives it.
    pub fn new() -> (Self, DictationFeed) {
        let state = Arc::new(Mutex::new(ManualState::default()));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let capability = Self {
            state: Arc::clone(&state),
            events_rx: Some(events_rx),
        };
        let feed = DictationFeed { state, events_tx };
        (capability, feed)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ManualState>, VoiceError> {
        self.state
            .lock()
            .map_err(|e| VoiceError::Refused(format!("capability state poisoned: {}", e)))
    }
}

impl SpeechCapability for ManualCapability {
    fn start(&mut self, continuous: bool) -> Result<(), VoiceError> {
        let mut state = self.lock()?;
        if !state.listening {
            state.listening = true;
            state.continuous = continuous;
            state.transcript.clear();
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), VoiceError> {
        let mut state = self.lock()?;
        state.listening = false;
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.state.lock().map(|s| s.listening).unwrap_or(false)
    }

    fn subscribe(&mut self) -> Option<mpsc::UnboundedReceiver<CaptureEvent>> {
        self.events_rx.take()
    }
}

impl DictationFeed {
    /// Feed one recognized phrase.
    ///
    /// Returns `false` if capture is not running; the phrase is discarded.
    pub fn dictate(&self, phrase: &str) -> bool {
        let phrase = phrase.trim();
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        if !state.listening || phrase.is_empty() {
            return false;
        }
        if !state.transcript.is_empty() {
            state.transcript.push(' ');
        }
        state.transcript.push_str(phrase);
        let _ = self
            .events_tx
            .send(CaptureEvent::Transcript(state.transcript.clone()));

        if !state.continuous {
            state.listening = false;
            let _ = self.events_tx.send(CaptureEvent::Ended);
        }
        true
    }

    /// Simulate the host ending capture (permission revoked, device lost).
    pub fn end(&self) {
        if let Ok(mut state) = self.state.lock() {
            if state.listening {
                state.listening = false;
                let _ = self.events_tx.send(CaptureEvent::Ended);
            }
        }
    }
}

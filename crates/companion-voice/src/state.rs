//! Voice session state.
//!
//! Capture has two states:
//! - Idle -> Listening (capture started)
//! - Listening -> Idle (capture stopped by the user or ended by the host)
//!
//! Redundant transitions (Idle -> Idle, Listening -> Listening) are refused so
//! that a repeated start or stop leaves the session untouched.

use std::fmt;

use chrono::{DateTime, Utc};

/// Operational state of voice capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureState {
    /// Capture is not running.
    Idle,
    /// Continuous capture is running and the transcript is live.
    Listening,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "Idle"),
            CaptureState::Listening => write!(f, "Listening"),
        }
    }
}

impl CaptureState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &CaptureState) -> bool {
        matches!(
            (self, target),
            (CaptureState::Idle, CaptureState::Listening)
                | (CaptureState::Listening, CaptureState::Idle)
        )
    }
}

/// Capture status plus the live transcript.
///
/// The transcript is only meaningful while `active` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceSession {
    active: bool,
    live_transcript: String,
    started_at: Option<DateTime<Utc>>,
}

impl VoiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        if self.active {
            CaptureState::Listening
        } else {
            CaptureState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn live_transcript(&self) -> &str {
        &self.live_transcript
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Mark capture as running with an empty transcript.
    ///
    /// Returns `false` and changes nothing if capture was already running.
    pub(crate) fn begin(&mut self) -> bool {
        if !self.state().can_transition_to(&CaptureState::Listening) {
            return false;
        }
        tracing::debug!("Voice capture state: {} -> {}", self.state(), CaptureState::Listening);
        self.active = true;
        self.live_transcript.clear();
        self.started_at = Some(Utc::now());
        true
    }

    /// Mark capture as stopped and drop the transcript.
    ///
    /// Returns `false` and changes nothing if capture was not running.
    pub(crate) fn end(&mut self) -> bool {
        if !self.state().can_transition_to(&CaptureState::Idle) {
            return false;
        }
        tracing::debug!("Voice capture state: {} -> {}", self.state(), CaptureState::Idle);
        self.active = false;
        self.live_transcript.clear();
        self.started_at = None;
        true
    }

    /// Replace the transcript with the capability's latest reading.
    ///
    /// Ignored while idle; late updates from a stopped capture are stale.
    pub(crate) fn replace_transcript(&mut self, transcript: String) -> bool {
        if !self.active {
            return false;
        }
        self.live_transcript = transcript;
        true
    }

    pub(crate) fn clear_transcript(&mut self) {
        self.live_transcript.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================

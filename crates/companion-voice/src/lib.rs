//! Companion voice crate - voice capture adapter over a host speech capability.
//!
//! The host capability (browser speech API, OS dictation service, or the
//! in-process manual feed used by the terminal client) is opaque. The adapter
//! keeps a `VoiceSession` that mirrors whether capture is running and what the
//! live transcript currently reads. Capability updates arrive as
//! `CaptureEvent`s on a channel subscribed once at construction.

pub mod adapter;
pub mod capability;
pub mod error;
pub mod state;

pub use adapter::VoiceCaptureAdapter;
pub use capability::{
    CaptureEvent, DictationFeed, ManualCapability, SpeechCapability, UnavailableCapability,
};
pub use error::VoiceError;
pub use state::{CaptureState, VoiceSession};

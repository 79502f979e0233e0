//! Interaction core for Companion.
//!
//! Reconciles the conversation mode, the memory-editing view, the voice
//! capture session and in-flight chat exchanges. All mutations go through
//! [`InteractionOrchestrator`], which processes user actions, voice events and
//! chat completions one at a time on a single logical thread.

pub mod action;
pub mod mode;
pub mod orchestrator;
pub mod view;

pub use action::UserAction;
pub use mode::ModeController;
pub use orchestrator::{Background, InteractionOrchestrator};
pub use view::{Layout, ViewState};

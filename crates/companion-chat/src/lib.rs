//! Chat transport for Companion.
//!
//! Provides the request/response exchange with the remote chat endpoint, the
//! memory backend client, a health probe, and the chat-display contract that
//! receives resolved responses.

pub mod display;
pub mod error;
pub mod health;
pub mod memory;
pub mod transport;
pub mod types;

pub use display::{ChatDisplay, ChatLog};
pub use error::ChatError;
pub use health::HealthProbe;
pub use memory::MemoryClient;
pub use transport::{ChatTransport, HttpChatTransport, FALLBACK_REPLY};
pub use types::{ChatDelivery, ChatExchange, ChatReply, ChatRequest, HealthStatus, UserMemory};

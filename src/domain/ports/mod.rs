//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces infrastructure adapters
//! implement:
//! - ChatTransport: one way of sending a chat request to the model server
//! - ReachabilityProbe: pre-flight check that the model server is up

pub mod chat_transport;
pub mod reachability;

pub use chat_transport::{ChatMessage, ChatRequest, ChatTransport, TransportError, SYSTEM_PROMPT};
pub use reachability::ReachabilityProbe;

//! Chat Transport Port
//!
//! A transport is one strategy for delivering a chat request to the model
//! server. The invoker holds an ordered list of transports and uses the first
//! one that succeeds:
//! - Native client (typed `/api/chat` client, optional)
//! - Raw REST fallback (always available)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// System message sent ahead of every prompt
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// A single message in a chat exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author ("system", "user" or "assistant")
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Non-streaming chat request body for `/api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,

    /// System message followed by the user prompt
    pub messages: Vec<ChatMessage>,

    /// Always false; replies are read as a single JSON document
    pub stream: bool,
}

impl ChatRequest {
    /// Build the two-message exchange used by every agent
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            stream: false,
        }
    }
}

/// Error types for transport operations
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Server answered with a non-2xx status
    #[error("{status} error for url ({url}): {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// No complete reply within the request timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Connection or transfer failure
    #[error("Network error: {0}")]
    Network(String),

    /// Reply body could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Port trait for chat transports
///
/// Implementations return a tagged result instead of panicking or bubbling
/// errors past the invoker: `Ok(text)` is a reply, `Err` is a reason to try
/// the next transport.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Short identifier used in logs, e.g. "native" or "rest"
    fn transport_id(&self) -> &str;

    /// Send the request and return the reply text
    async fn chat(&self, request: &ChatRequest) -> Result<String, TransportError>;
}

//! Typed `/api/chat` response shapes used by the native client.

use serde::Deserialize;

/// Non-streaming reply from `/api/chat`; fields the client does not read are
/// ignored during decoding
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Assistant message
    pub message: ReplyMessage,
}

/// Assistant message inside a chat reply
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessage {
    /// Reply text
    pub content: String,
}

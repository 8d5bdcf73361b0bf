//! Native Ollama client
//!
//! Typed client for `/api/chat`. The reply must decode into the documented
//! response shape (`message.content`); anything else is reported as a
//! malformed response so the invoker can fall back to the raw REST path.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;

use super::types::ChatResponse;
use super::{build_http_client, chat_endpoint, post_chat};
use crate::domain::models::ModelConfig;
use crate::domain::ports::{ChatRequest, ChatTransport, TransportError};

/// Typed `/api/chat` client
pub struct NativeChatClient {
    http_client: ReqwestClient,
    endpoint: String,
    timeout_secs: u64,
}

impl NativeChatClient {
    /// Client for `{base_url}/api/chat` with a total request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(timeout_secs)?,
            endpoint: chat_endpoint(base_url),
            timeout_secs,
        })
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        Self::new(&config.base_url, config.request_timeout_secs)
    }
}

#[async_trait]
impl ChatTransport for NativeChatClient {
    fn transport_id(&self) -> &str {
        "native"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, TransportError> {
        let response = post_chat(&self.http_client, &self.endpoint, request, self.timeout_secs).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let parsed: ChatResponse = serde_json::from_slice(&body)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

        Ok(parsed.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_decodes_message_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-oss:latest",
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"gpt-oss:latest","message":{"role":"assistant","content":"hi"},"done":true}"#)
            .create_async()
            .await;

        let client = NativeChatClient::new(&server.url(), 5).unwrap();
        let request = ChatRequest::single_turn("gpt-oss:latest", "hello");
        let reply = client.chat(&request).await.unwrap();

        assert_eq!(reply, "hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejects_messages_array_shape() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"messages":[{"content":"A"}]}"#)
            .create_async()
            .await;

        let client = NativeChatClient::new(&server.url(), 5).unwrap();
        let request = ChatRequest::single_turn("m", "p");
        let err = client.chat(&request).await.unwrap_err();

        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model 'missing' not found"}"#)
            .create_async()
            .await;

        let client = NativeChatClient::new(&server.url(), 5).unwrap();
        let request = ChatRequest::single_turn("missing", "p");
        let err = client.chat(&request).await.unwrap_err();

        match err {
            TransportError::Status { status, body, .. } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }
}

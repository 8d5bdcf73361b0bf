//! REST fallback transport
//!
//! Plain `POST {base_url}/api/chat` with lenient reply extraction. This path
//! works against any server speaking the chat endpoint, so it always sits
//! last in the invoker's transport list.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;

use super::{build_http_client, chat_endpoint, extract_reply, post_chat};
use crate::domain::models::ModelConfig;
use crate::domain::ports::{ChatRequest, ChatTransport, TransportError};

/// Raw JSON `/api/chat` transport
pub struct RestChatTransport {
    http_client: ReqwestClient,
    endpoint: String,
    timeout_secs: u64,
}

impl RestChatTransport {
    /// Transport for `{base_url}/api/chat` with a total request timeout
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
impl ChatTransport for RestChatTransport {
    fn transport_id(&self) -> &str {
        "rest"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, TransportError> {
        let response = post_chat(&self.http_client, &self.endpoint, request, self.timeout_secs).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

        Ok(extract_reply(&body))
    }
}

//! Ollama model server adapters
//!
//! - `probe`: TCP reachability check
//! - `native`: typed `/api/chat` client (preferred transport)
//! - `rest`: raw `/api/chat` fallback with lenient reply extraction
//! - `extract`: reply extraction over arbitrary JSON bodies

pub mod extract;
pub mod native;
pub mod probe;
pub mod rest;
pub mod types;

pub use extract::extract_reply;
pub use native::NativeChatClient;
pub use probe::TcpReachabilityProbe;
pub use rest::RestChatTransport;

use anyhow::{Context, Result};
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;

use crate::domain::ports::{ChatRequest, TransportError};

/// Path of the chat completion endpoint, relative to the base URL
pub const CHAT_PATH: &str = "/api/chat";

/// Join the configured base URL with the chat endpoint path
pub fn chat_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH)
}

/// Build an HTTP client with the given request timeout
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<ReqwestClient> {
    ReqwestClient::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .tcp_nodelay(true)
        .build()
        .context("Failed to build HTTP client")
}

/// POST a chat request and reject non-2xx statuses
pub(crate) async fn post_chat(
    http_client: &ReqwestClient,
    endpoint: &str,
    request: &ChatRequest,
    timeout_secs: u64,
) -> Result<Response, TransportError> {
    let response = http_client
        .post(endpoint)
        .header(header::CONTENT_TYPE, "application/json")
        .json(request)
        .send()
        .await
        .map_err(|e| classify_reqwest_error(&e, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        return Err(TransportError::Status {
            status: status.as_u16(),
            url: endpoint.to_string(),
            body,
        });
    }

    Ok(response)
}

fn classify_reqwest_error(err: &reqwest::Error, timeout_secs: u64) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout_secs)
    } else {
        TransportError::Network(err.to_string())
    }
}

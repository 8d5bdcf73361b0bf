//! Model invocation with reachability gating and ordered transport fallback.
//!
//! The invoker never returns an error: every failure becomes display text.
//! [`InvocationResult::outcome`] carries the success/failure distinction for
//! callers that need it; the text is identical either way.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::models::ModelConfig;
use crate::domain::ports::{ChatRequest, ChatTransport, ReachabilityProbe};
use crate::infrastructure::ollama::{NativeChatClient, RestChatTransport, TcpReachabilityProbe};
use crate::services::prompts::truncate_chars;

/// Returned without any network call when the reachability probe fails
pub const SERVER_UNREACHABLE_MESSAGE: &str =
    "Ollama server is not running. Please start it before proceeding.";

/// Prefix of the text returned once every transport has failed
pub const CHAT_API_ERROR_PREFIX: &str = "ERROR calling Ollama chat API";

/// Number of characters of prompts and replies written to the log
const LOG_PREVIEW_CHARS: usize = 200;

/// How an invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// A transport produced a reply
    Completed { transport: String },

    /// The reachability probe failed; no transport was attempted
    ServerUnreachable,

    /// Every transport failed
    Failed,
}

/// Reply text (or error text) plus how it was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Reply text, or the error text shown in its place
    pub text: String,
    pub outcome: InvocationOutcome,
}

impl InvocationResult {
    /// True when a transport produced a reply
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, InvocationOutcome::Completed { .. })
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Sends prompts to the model server
pub struct ModelInvoker {
    model: String,
    probe: Arc<dyn ReachabilityProbe>,
    transports: Vec<Arc<dyn ChatTransport>>,
}

impl ModelInvoker {
    /// Create an invoker with an explicit probe and ordered transport list
    pub fn new(
        model: impl Into<String>,
        probe: Arc<dyn ReachabilityProbe>,
        transports: Vec<Arc<dyn ChatTransport>>,
    ) -> Self {
        Self {
            model: model.into(),
            probe,
            transports,
        }
    }

    /// Build the production invoker: TCP probe, then the native client (when
    /// enabled) followed by the REST fallback
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let probe: Arc<dyn ReachabilityProbe> = Arc::new(TcpReachabilityProbe::from_config(config));

        let mut transports: Vec<Arc<dyn ChatTransport>> = Vec::with_capacity(2);
        if config.native_client {
            match NativeChatClient::from_config(config) {
                Ok(client) => transports.push(Arc::new(client)),
                Err(err) => warn!(error = %err, "native client unavailable, using REST fallback only"),
            }
        }
        transports.push(Arc::new(RestChatTransport::from_config(config)?));

        Ok(Self::new(config.name.clone(), probe, transports))
    }

    /// Model name sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Identifiers of the configured transports, in the order they are tried
    pub fn transport_ids(&self) -> Vec<String> {
        self.transports
            .iter()
            .map(|transport| transport.transport_id().to_string())
            .collect()
    }

    /// Address the reachability probe connects to
    pub fn probe_target(&self) -> String {
        self.probe.target()
    }

    /// Run the reachability probe on its own
    pub async fn is_server_reachable(&self) -> bool {
        self.probe.is_server_reachable().await
    }

    /// Send a prompt and return the reply text, or error text on failure
    pub async fn invoke(&self, prompt: &str) -> InvocationResult {
        if !self.probe.is_server_reachable().await {
            error!(probe = %self.probe.target(), "{SERVER_UNREACHABLE_MESSAGE}");
            return InvocationResult {
                text: SERVER_UNREACHABLE_MESSAGE.to_string(),
                outcome: InvocationOutcome::ServerUnreachable,
            };
        }

        info!(
            model = %self.model,
            "Prompt sent to model {}: {}",
            self.model,
            log_preview(prompt)
        );

        let request = ChatRequest::single_turn(self.model.as_str(), prompt);
        let mut last_failure: Option<String> = None;

        for transport in &self.transports {
            let transport_id = transport.transport_id();
            match transport.chat(&request).await {
                Ok(reply) => {
                    info!(
                        transport = transport_id,
                        "Response from model: {}",
                        log_preview(&reply)
                    );
                    return InvocationResult {
                        text: reply,
                        outcome: InvocationOutcome::Completed {
                            transport: transport_id.to_string(),
                        },
                    };
                }
                Err(err) => {
                    error!(transport = transport_id, "{transport_id} chat failed: {err}");
                    last_failure = Some(err.to_string());
                }
            }
        }

        let detail = last_failure.unwrap_or_else(|| "no chat transport configured".to_string());
        let text = format!("{CHAT_API_ERROR_PREFIX}: {detail}");
        error!("{text}");

        InvocationResult {
            text,
            outcome: InvocationOutcome::Failed,
        }
    }
}

fn log_preview(text: &str) -> String {
    format!("{}...", truncate_chars(text, LOG_PREVIEW_CHARS))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::ports::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub struct FixedProbe(pub bool);

    #[async_trait]
    impl ReachabilityProbe for FixedProbe {
        fn target(&self) -> String {
            "fixed".to_string()
        }

        async fn is_server_reachable(&self) -> bool {
            self.0
        }
    }

    /// Transport replaying scripted replies and recording prompts
    pub struct ScriptedTransport {
        id: &'static str,
        replies: Mutex<Vec<Result<String, String>>>,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        /// Replies are consumed front to back; the last one repeats
        pub fn new(id: &'static str, replies: Vec<Result<String, String>>) -> Self {
            Self {
                id,
                replies: Mutex::new(replies),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(id: &'static str, reply: &str) -> Self {
            Self::new(id, vec![Ok(reply.to_string())])
        }

        pub fn failing(id: &'static str, reason: &str) -> Self {
            Self::new(id, vec![Err(reason.to_string())])
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        fn transport_id(&self) -> &str {
            self.id
        }

        async fn chat(&self, request: &ChatRequest) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let prompt = request
                .messages
                .last()
                .map(|message| message.content.clone())
                .unwrap_or_default();
            self.prompts.lock().unwrap().push(prompt);

            let mut replies = self.replies.lock().unwrap();
            let next = if replies.len() > 1 {
                replies.remove(0)
            } else {
                replies[0].clone()
            };
            next.map_err(TransportError::Network)
        }
    }

    pub fn invoker_with(reachable: bool, transports: Vec<Arc<ScriptedTransport>>) -> ModelInvoker {
        let transports = transports
            .into_iter()
            .map(|transport| transport as Arc<dyn ChatTransport>)
            .collect();
        ModelInvoker::new("test-model", Arc::new(FixedProbe(reachable)), transports)
    }
}

//! codegate - multi-agent code review with gated deployment
//!
//! A file is analysed by four model-backed agents (code review,
//! vulnerability, efficiency, impact). An approval agent turns the four
//! analyses into a verdict, and only an approved file is copied into the
//! deployment directory.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): agent outputs, configuration, ports and errors
//! - **Service Layer** (`services`): model invocation, agents and the review workflow
//! - **Infrastructure Layer** (`infrastructure`): Ollama transports, TCP probe,
//!   configuration loading, logging and audit files
//! - **CLI Layer** (`cli`): Command-line interface

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AgentLabel, AgentOutput, ApprovalOutput, Config, DeployOutput, ReviewReport, Verdict,
};
pub use domain::ports::{ChatRequest, ChatTransport, ReachabilityProbe, TransportError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    InvocationOutcome, InvocationResult, ModelInvoker, ReviewWorkflow, UploadedFile,
};

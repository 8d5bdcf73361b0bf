//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Ollama model server adapters (reachability probe, chat transports)
//! - Configuration management
//! - Logging infrastructure
//! - Audit document persistence
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod audit;
pub mod config;
pub mod logging;
pub mod ollama;

//! Domain layer for codegate
//!
//! This module contains the agent output models, configuration types, error
//! types and the port traits infrastructure adapters implement.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{AuditError, DeployError, UploadError, WorkflowError};

//! Domain models.

pub mod agent_output;
pub mod config;

pub use agent_output::{AgentLabel, AgentOutput, ApprovalOutput, DeployOutput, ReviewReport, Verdict};
pub use config::{
    Config, LogFormat, LoggingConfig, ModelConfig, OutputConfig, ReviewConfig, RotationPolicy,
};

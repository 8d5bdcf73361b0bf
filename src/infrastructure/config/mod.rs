//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides (MODEL_NAME, MODEL_BASE_URL, CODEGATE_*)
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, CONFIG_DIR};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for codegate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Model server configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Review behaviour (truncation, accepted uploads)
    #[serde(default)]
    pub review: ReviewConfig,

    /// Output directories for deployed files and audit documents
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelConfig {
    /// Model identifier sent with every chat request
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Base URL of the Ollama HTTP API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Host used by the reachability probe
    #[serde(default = "default_probe_host")]
    pub probe_host: String,

    /// Port used by the reachability probe
    #[serde(default = "default_probe_port")]
    pub probe_port: u16,

    /// Connect timeout for the reachability probe in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Timeout for a single chat request in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Try the typed native client before the raw REST fallback
    #[serde(default = "default_true")]
    pub native_client: bool,
}

fn default_model_name() -> String {
    "gpt-oss:latest".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_probe_host() -> String {
    "localhost".to_string()
}

const fn default_probe_port() -> u16 {
    11434
}

const fn default_probe_timeout_ms() -> u64 {
    2000
}

const fn default_request_timeout_secs() -> u64 {
    120
}

const fn default_true() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            base_url: default_base_url(),
            probe_host: default_probe_host(),
            probe_port: default_probe_port(),
            probe_timeout_ms: default_probe_timeout_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            native_client: default_true(),
        }
    }
}

/// Review configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewConfig {
    /// Maximum number of characters of file content embedded in a prompt
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    /// Number of characters shown in the upload preview
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// File extensions accepted for review (without the leading dot)
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

const fn default_max_content_chars() -> usize {
    15_000
}

const fn default_preview_chars() -> usize {
    500
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["java".to_string(), "js".to_string(), "properties".to_string()]
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_content_chars: default_max_content_chars(),
            preview_chars: default_preview_chars(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Output directory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// Directory approved files are copied into
    #[serde(default = "default_deploy_dir")]
    pub deploy_dir: PathBuf,

    /// Directory audit documents are written to
    #[serde(default = "default_audit_dir")]
    pub audit_dir: PathBuf,
}

fn default_deploy_dir() -> PathBuf {
    PathBuf::from("deployed")
}

fn default_audit_dir() -> PathBuf {
    PathBuf::from("audit")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            deploy_dir: default_deploy_dir(),
            audit_dir: default_audit_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output format (the log file is always JSON lines)
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for the log file (if None, logs only go to the console)
    #[serde(default = "default_log_dir")]
    pub log_dir: Option<PathBuf>,

    /// Mirror log lines to stderr
    #[serde(default)]
    pub enable_console: bool,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Console log format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Daily,
    Hourly,
    #[default]
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_log_dir() -> Option<PathBuf> {
    Some(PathBuf::from("logs"))
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: default_log_dir(),
            enable_console: false,
            rotation: RotationPolicy::default(),
        }
    }
}

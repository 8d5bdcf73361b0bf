//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON-lines log file via tracing-appender
//! - Optional stderr console output (json or pretty)

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl, LOG_FILE_NAME};

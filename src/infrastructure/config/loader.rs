use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project configuration directory
pub const CONFIG_DIR: &str = ".codegate";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Model name cannot be empty")]
    EmptyModelName,

    #[error("Invalid model base URL: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Probe host cannot be empty")]
    EmptyProbeHost,

    #[error("Invalid probe_timeout_ms: {0}. Must be at least 1")]
    InvalidProbeTimeout(u64),

    #[error("Invalid request_timeout_secs: {0}. Must be at least 1")]
    InvalidRequestTimeout(u64),

    #[error("Invalid max_content_chars: {0}. Must be at least 1")]
    InvalidMaxContentChars(usize),

    #[error("At least one allowed file extension is required")]
    NoAllowedExtensions,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .codegate/config.yaml (project config, created by init)
    /// 3. .codegate/local.yaml (project local overrides, optional)
    /// 4. Environment variables (CODEGATE_* prefix, `__` separates sections)
    /// 5. MODEL_NAME / MODEL_BASE_URL
    pub fn load() -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("config.yaml")))
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("local.yaml")))
            .merge(Env::prefixed("CODEGATE_").split("__"))
            .merge(Self::model_env())
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring the
    /// environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("CODEGATE_").split("__"))
            .merge(Self::model_env())
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Map the two well-known model variables onto their config keys
    fn model_env() -> Env {
        Env::raw()
            .only(&["MODEL_NAME", "MODEL_BASE_URL"])
            .map(|key| {
                if key == "MODEL_NAME" {
                    "model.name".into()
                } else if key == "MODEL_BASE_URL" {
                    "model.base_url".into()
                } else {
                    key.into()
                }
            })
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.model.name.trim().is_empty() {
            return Err(ConfigError::EmptyModelName);
        }

        let base_url = &config.model.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.clone()));
        }

        if config.model.probe_host.trim().is_empty() {
            return Err(ConfigError::EmptyProbeHost);
        }

        if config.model.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidProbeTimeout(config.model.probe_timeout_ms));
        }

        if config.model.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout(
                config.model.request_timeout_secs,
            ));
        }

        if config.review.max_content_chars == 0 {
            return Err(ConfigError::InvalidMaxContentChars(
                config.review.max_content_chars,
            ));
        }

        if config.review.allowed_extensions.is_empty() {
            return Err(ConfigError::NoAllowedExtensions);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::LogFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.name, "gpt-oss:latest");
        assert_eq!(config.model.base_url, "http://localhost:11434");
        assert_eq!(config.model.probe_port, 11434);
        assert_eq!(config.model.probe_timeout_ms, 2000);
        assert_eq!(config.model.request_timeout_secs, 120);
        assert_eq!(config.review.max_content_chars, 15_000);
        assert_eq!(config.review.allowed_extensions, vec!["java", "js", "properties"]);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
model:
  name: llama3:8b
  base_url: http://gpu-box:11434
  native_client: false
review:
  max_content_chars: 4000
logging:
  level: debug
  format: pretty
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.model.name, "llama3:8b");
        assert_eq!(config.model.base_url, "http://gpu-box:11434");
        assert!(!config.model.native_client);
        assert_eq!(config.model.probe_port, 11434, "unset fields keep defaults");
        assert_eq!(config.review.max_content_chars, 4000);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_empty_model_name() {
        let mut config = Config::default();
        config.model.name = "  ".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_invalid_base_url() {
        let mut config = Config::default();
        config.model.base_url = "localhost:11434".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidBaseUrl(url)) => assert_eq!(url, "localhost:11434"),
            other => panic!("Expected InvalidBaseUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_timeouts() {
        let mut config = Config::default();
        config.model.probe_timeout_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidProbeTimeout(0))
        ));

        let mut config = Config::default();
        config.model.request_timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRequestTimeout(0))
        ));
    }

    #[test]
    fn test_validate_zero_max_content_chars() {
        let mut config = Config::default();
        config.review.max_content_chars = 0;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxContentChars(0))
        ));
    }

    #[test]
    fn test_validate_no_extensions() {
        let mut config = Config::default();
        config.review.allowed_extensions.clear();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::NoAllowedExtensions)
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_model_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "model:\n  name: from-file\n  base_url: http://file:11434").unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("MODEL_NAME", Some("from-env")),
                ("MODEL_BASE_URL", None::<&str>),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.model.name, "from-env");
                assert_eq!(config.model.base_url, "http://file:11434");
            },
        );
    }

    #[test]
    fn test_prefixed_env_overrides_nested_field() {
        temp_env::with_vars(
            [
                ("CODEGATE_REVIEW__MAX_CONTENT_CHARS", Some("1234")),
                ("MODEL_NAME", None),
                ("MODEL_BASE_URL", None),
            ],
            || {
                let mut file = NamedTempFile::new().unwrap();
                writeln!(file, "logging:\n  level: info").unwrap();
                file.flush().unwrap();
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.review.max_content_chars, 1234);
            },
        );
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(base_file, "model:\n  name: base\nlogging:\n  level: info\n  format: pretty").unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "model:\n  name: override\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.model.name, "override", "Override should win");
        assert_eq!(config.logging.level, "debug", "Override should win for nested fields");
        assert_eq!(
            config.logging.format,
            LogFormat::Pretty,
            "Base value should persist when not overridden"
        );
    }
}

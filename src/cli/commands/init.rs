//! Implementation of the `codegate init` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::CONFIG_DIR;

const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Result of `codegate init`
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        if self.success {
            format!("{}\n  {}", self.message, self.config_path.display())
        } else {
            self.message.clone()
        }
    }
}

/// Write the default configuration and print the result
pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let result = write_default_config(&args.path, args.force).await?;
    output(&result, json_mode);
    Ok(())
}

/// Write the default configuration under `<root>/.codegate/config.yaml`
pub async fn write_default_config(root: &std::path::Path, force: bool) -> Result<InitOutput> {
    let config_dir = root.join(CONFIG_DIR);
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        return Ok(InitOutput {
            success: false,
            message: "Configuration already exists. Use --force to overwrite.".to_string(),
            config_path,
        });
    }

    fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;

    let yaml = serde_yaml::to_string(&Config::default())
        .context("Failed to serialize default configuration")?;
    fs::write(&config_path, yaml)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(InitOutput {
        success: true,
        message: if force {
            "Configuration rewritten.".to_string()
        } else {
            "Configuration initialized.".to_string()
        },
        config_path,
    })
}

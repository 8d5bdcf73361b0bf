//! Implementation of the `codegate check` command.

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{ModelInvoker, SERVER_UNREACHABLE_MESSAGE};

#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Result of `codegate check`
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub reachable: bool,
    pub model: String,
    pub base_url: String,
    pub probe_target: String,
    pub transports: Vec<String>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} Ollama server is running and ready.",
            style("✓").green().bold()
        )];
        lines.push(format!("  Model:      {}", self.model));
        lines.push(format!("  Base URL:   {}", self.base_url));
        lines.push(format!("  Probe:      {}", self.probe_target));
        lines.push(format!("  Transports: {}", self.transports.join(" -> ")));
        lines.join("\n")
    }
}

/// Probe the server and print its status; fails when unreachable
pub async fn execute(_args: CheckArgs, config: &Config, json_mode: bool) -> Result<()> {
    let invoker = ModelInvoker::from_config(&config.model)?;

    if !invoker.is_server_reachable().await {
        bail!(
            "{SERVER_UNREACHABLE_MESSAGE} (probed {})",
            invoker.probe_target()
        );
    }

    let result = CheckOutput {
        reachable: true,
        model: invoker.model().to_string(),
        base_url: config.model.base_url.clone(),
        probe_target: invoker.probe_target(),
        transports: invoker.transport_ids(),
    };
    output(&result, json_mode);
    Ok(())
}

//! codegate CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use codegate::cli::{commands, handle_error, Cli, Commands};
use codegate::domain::models::Config;
use codegate::infrastructure::config::ConfigLoader;
use codegate::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        command,
        json,
        config,
    } = cli;

    match command {
        Commands::Init(args) => commands::init::execute(args, json).await,
        Commands::Check(args) => {
            let (config, _logger) = bootstrap(config.as_deref())?;
            commands::check::execute(args, &config, json).await
        }
        Commands::Review(args) => {
            let (config, _logger) = bootstrap(config.as_deref())?;
            commands::review::execute(args, &config, json).await
        }
    }
}

/// Load configuration and install logging; the logger flushes on drop
fn bootstrap(config_path: Option<&Path>) -> Result<(Config, LoggerImpl)> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let logger = LoggerImpl::init(&config.logging)?;
    Ok((config, logger))
}

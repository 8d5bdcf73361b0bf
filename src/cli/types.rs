//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{check::CheckArgs, init::InitArgs, review::ReviewArgs};

#[derive(Parser, Debug)]
#[command(name = "codegate")]
#[command(about = "codegate - multi-agent code review and gated deployment", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .codegate/
    #[arg(short, long, global = true, env = "CODEGATE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .codegate/config.yaml
    Init(InitArgs),

    /// Check that the model server is reachable
    Check(CheckArgs),

    /// Review a file, optionally request approval, deploy and save an audit log
    Review(ReviewArgs),
}

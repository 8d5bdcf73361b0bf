//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use output::progress::{create_spinner, ProgressBarExt};
pub use types::{Cli, Commands};

use console::style;

/// Print an error in the selected output mode and exit with status 1
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().skip(1).map(|cause| cause.to_string()).collect();
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": chain,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", style("Error:").red().bold());
    }
    std::process::exit(1);
}

//! Output formatting utilities for the CLI.

pub mod progress;

use console::style;
use serde::Serialize;

use crate::domain::models::Verdict;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Bold section heading followed by an underline
pub fn section(title: &str) -> String {
    format!(
        "{}\n{}",
        style(title).cyan().bold(),
        style("─".repeat(title.chars().count())).dim()
    )
}

pub fn verdict_badge(verdict: Verdict) -> String {
    match verdict {
        Verdict::Approved => style("APPROVED").green().bold().to_string(),
        Verdict::Rejected => style("REJECTED").red().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_contains_title() {
        console::set_colors_enabled(false);
        assert_eq!(section("Impact"), "Impact\n──────");
    }

    #[test]
    fn test_verdict_badge_plain() {
        console::set_colors_enabled(false);
        assert_eq!(verdict_badge(Verdict::Approved), "APPROVED");
        assert_eq!(verdict_badge(Verdict::Rejected), "REJECTED");
    }
}

//! Implementation of the `codegate review` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::progress::{create_spinner, hidden_spinner, ProgressBarExt};
use crate::cli::output::{output, section, verdict_badge, CommandOutput};
use crate::domain::models::{AgentLabel, ApprovalOutput, Config, DeployOutput, ReviewReport};
use crate::domain::WorkflowError;
use crate::services::{ReviewWorkflow, DEFAULT_APPROVER, SERVER_UNREACHABLE_MESSAGE};

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// File to review (.java, .js or .properties by default)
    pub file: PathBuf,

    /// Ask the model for an approval verdict after the analyses
    #[arg(long)]
    pub approve: bool,

    /// Approver name or email recorded in the log
    #[arg(long, default_value = DEFAULT_APPROVER)]
    pub approver: String,

    /// Copy the file into the deployment directory if approved
    #[arg(long, requires = "approve")]
    pub deploy: bool,

    /// Save the four analyses as an audit document
    #[arg(long)]
    pub audit: bool,
}

/// Everything `codegate review` produced for one file
#[derive(Debug, Serialize)]
pub struct ReviewOutput {
    #[serde(skip)]
    pub preview: String,
    pub report: ReviewReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval: Option<ApprovalOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<DeployOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_refused: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_path: Option<PathBuf>,
}

impl CommandOutput for ReviewOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("File: {}", style(&self.report.filename).bold()),
            style(&self.preview).dim().to_string(),
            String::new(),
        ];

        for agent_output in self.report.outputs() {
            lines.push(section(agent_output.agent.title()));
            lines.push(agent_output.result.clone());
            lines.push(String::new());
        }

        if let Some(approval) = &self.approval {
            lines.push(section(AgentLabel::Approval.title()));
            lines.push(format!("Verdict: {}", verdict_badge(approval.status)));
            lines.push(approval.result.clone());
            lines.push(String::new());
        }

        if let Some(deployment) = &self.deployment {
            lines.push(section(AgentLabel::Deploy.title()));
            lines.push(format!(
                "Deployed to {}",
                style(deployment.deployed_path.display()).green()
            ));
            for step in &deployment.steps {
                lines.push(format!("  - {step}"));
            }
            lines.push(String::new());
        } else if let Some(reason) = &self.deployment_refused {
            lines.push(section(AgentLabel::Deploy.title()));
            lines.push(style(reason).yellow().to_string());
            lines.push(String::new());
        }

        if let Some(path) = &self.audit_path {
            lines.push(format!("Audit log saved to {}", path.display()));
        }

        lines.join("\n").trim_end().to_string()
    }
}

/// Run the review workflow for one file and print the result
pub async fn execute(args: ReviewArgs, config: &Config, json_mode: bool) -> Result<()> {
    let workflow = ReviewWorkflow::from_config(config)?;

    let status = workflow.server_status().await;
    if !status.reachable {
        bail!(SERVER_UNREACHABLE_MESSAGE);
    }

    let file = workflow
        .upload(&args.file)
        .await
        .with_context(|| format!("Failed to upload {}", args.file.display()))?;

    let spinner = if json_mode { hidden_spinner() } else { create_spinner() };
    let report = workflow
        .analyze_with_progress(&file, |kind| {
            spinner.set_message(format!("Running {}...", kind.label().title()));
        })
        .await;
    spinner.finish_success(format!("Analyzed {}", file.filename));

    let approval = if args.approve {
        let spinner = if json_mode { hidden_spinner() } else { create_spinner() };
        spinner.set_message(format!("Requesting approval from {}...", args.approver));
        let approval = workflow.request_approval(&args.approver, &report).await;
        spinner.finish_success(format!("Verdict: {}", approval.status));
        Some(approval)
    } else {
        None
    };

    let (deployment, deployment_refused) = match (&approval, args.deploy) {
        (Some(approval), true) => match workflow.deploy(&file, approval).await {
            Ok(deployed) => (Some(deployed), None),
            Err(err @ WorkflowError::NotApproved(_)) => (None, Some(err.to_string())),
            Err(err) => return Err(err).context("Deployment failed"),
        },
        _ => (None, None),
    };

    let audit_path = if args.audit {
        Some(
            workflow
                .save_audit(&report)
                .await
                .context("Failed to save audit log")?,
        )
    } else {
        None
    };

    let result = ReviewOutput {
        preview: workflow.preview(&file).to_string(),
        report,
        approval,
        deployment,
        deployment_refused,
        audit_path,
    };
    output(&result, json_mode);
    Ok(())
}

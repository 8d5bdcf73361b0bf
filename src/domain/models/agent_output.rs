//! Agent output domain models.
//!
//! Every agent wraps the model's reply under a fixed label. Outputs are
//! created once and never mutated; they are displayed, embedded in later
//! prompts, and written to audit documents.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Closed set of agent labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentLabel {
    CodeReview,
    Vulnerability,
    Efficiency,
    Impact,
    Approval,
    Deploy,
}

impl AgentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodeReview => "code_review",
            Self::Vulnerability => "vulnerability",
            Self::Efficiency => "efficiency",
            Self::Impact => "impact",
            Self::Approval => "approval",
            Self::Deploy => "deploy",
        }
    }

    /// Section heading used by the CLI.
    pub fn title(&self) -> &'static str {
        match self {
            Self::CodeReview => "Code Review",
            Self::Vulnerability => "Vulnerability Scan",
            Self::Efficiency => "Efficiency Suggestions",
            Self::Impact => "Impact Analysis",
            Self::Approval => "Approval Workflow",
            Self::Deploy => "Deployment",
        }
    }
}

impl std::fmt::Display for AgentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one of the four analysis agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Which agent produced the result
    pub agent: AgentLabel,
    /// Raw model reply, or the invoker's error text.
    pub result: String,
}

impl AgentOutput {
    pub fn new(agent: AgentLabel, result: impl Into<String>) -> Self {
        Self {
            agent,
            result: result.into(),
        }
    }
}

/// The four analysis outputs for one reviewed file.
///
/// This is also the shape of the audit document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Reviewed file name
    pub filename: String,
    /// Code review output
    pub review: AgentOutput,
    /// Vulnerability scan output
    pub vulnerability: AgentOutput,
    /// Efficiency suggestions output
    pub efficiency: AgentOutput,
    /// Impact analysis output
    pub impact: AgentOutput,
}

impl ReviewReport {
    /// Outputs in display order.
    pub fn outputs(&self) -> [&AgentOutput; 4] {
        [&self.review, &self.vulnerability, &self.efficiency, &self.impact]
    }
}

/// Approval verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Reply mentions "approve" and never "reject"
    Approved,
    /// Anything else
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Classify a free-text reply.
    ///
    /// Best-effort substring heuristic: approved iff the lower-cased reply
    /// contains "approve" and does not contain "reject". A reply such as
    /// "I would approve, but must reject" is therefore rejected.
    pub fn classify(reply: &str) -> Self {
        let lowered = reply.to_lowercase();
        if lowered.contains("approve") && !lowered.contains("reject") {
            Self::Approved
        } else {
            Self::Rejected
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the approval agent. The label is always [`AgentLabel::Approval`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalOutput {
    agent: AgentLabel,
    /// Model reply the verdict was classified from
    pub result: String,
    /// Verdict classified from `result`
    pub status: Verdict,
}

impl ApprovalOutput {
    /// Build an approval output, classifying the reply.
    pub fn from_reply(reply: impl Into<String>) -> Self {
        let result = reply.into();
        let status = Verdict::classify(&result);
        Self {
            agent: AgentLabel::Approval,
            result,
            status,
        }
    }

    /// Always [`AgentLabel::Approval`]
    pub fn agent(&self) -> AgentLabel {
        self.agent
    }
}

/// Output of the deploy agent.
///
/// `steps` are descriptive labels only; none of them are executed. The label
/// is always [`AgentLabel::Deploy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployOutput {
    agent: AgentLabel,
    /// Where the file was written
    pub deployed_path: PathBuf,
    /// Descriptive pipeline steps
    pub steps: Vec<String>,
    /// Approval the deployment went out under
    pub approval: ApprovalOutput,
}

impl DeployOutput {
    /// Build a deploy output labelled [`AgentLabel::Deploy`]
    pub fn new(deployed_path: PathBuf, steps: Vec<String>, approval: ApprovalOutput) -> Self {
        Self {
            agent: AgentLabel::Deploy,
            deployed_path,
            steps,
            approval,
        }
    }

    /// Always [`AgentLabel::Deploy`]
    pub fn agent(&self) -> AgentLabel {
        self.agent
    }
}

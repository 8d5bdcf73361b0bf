//! The four analysis agents.
//!
//! Each agent builds a domain prompt from the file name and the truncated
//! content, sends it through the shared [`ModelInvoker`], and wraps whatever
//! text comes back under its label. A failed invocation is not an error here;
//! its text becomes the agent's result.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::models::{AgentLabel, AgentOutput};
use crate::services::model_invoker::ModelInvoker;
use crate::services::prompts::{
    code_review_prompt, efficiency_prompt, impact_prompt, truncate_chars, vulnerability_prompt,
};

/// Default number of content characters embedded in a prompt
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 15_000;

/// Which analysis to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    /// Code quality review
    CodeReview,
    /// Security vulnerability scan
    Vulnerability,
    /// Performance suggestions
    Efficiency,
    /// Release impact analysis
    Impact,
}

impl AnalysisKind {
    /// All analyses, in the order the workflow runs them
    pub const ALL: [Self; 4] = [
        Self::CodeReview,
        Self::Vulnerability,
        Self::Efficiency,
        Self::Impact,
    ];

    /// Label attached to this analysis' output
    pub fn label(&self) -> AgentLabel {
        match self {
            Self::CodeReview => AgentLabel::CodeReview,
            Self::Vulnerability => AgentLabel::Vulnerability,
            Self::Efficiency => AgentLabel::Efficiency,
            Self::Impact => AgentLabel::Impact,
        }
    }

    fn build_prompt(&self, filename: &str, content: &str) -> String {
        match self {
            Self::CodeReview => code_review_prompt(filename, content),
            Self::Vulnerability => vulnerability_prompt(filename, content),
            Self::Efficiency => efficiency_prompt(filename, content),
            Self::Impact => impact_prompt(filename, content),
        }
    }
}

/// Runs the four analysis agents against one shared invoker
pub struct ReviewAgents {
    invoker: Arc<ModelInvoker>,
    max_content_chars: usize,
}

impl ReviewAgents {
    /// Create agents that embed at most `max_content_chars` characters of content
    pub fn new(invoker: Arc<ModelInvoker>, max_content_chars: usize) -> Self {
        Self {
            invoker,
            max_content_chars,
        }
    }

    /// Prompt that `run` would send for this analysis
    pub fn prompt_for(&self, kind: AnalysisKind, filename: &str, content: &str) -> String {
        kind.build_prompt(filename, truncate_chars(content, self.max_content_chars))
    }

    /// Run one analysis; invocation failures become the result text
    #[instrument(skip(self, content), fields(agent = %kind.label()))]
    pub async fn run(&self, kind: AnalysisKind, filename: &str, content: &str) -> AgentOutput {
        let prompt = self.prompt_for(kind, filename, content);
        debug!(prompt_chars = prompt.chars().count(), "running analysis");

        let result = self.invoker.invoke(&prompt).await;
        AgentOutput::new(kind.label(), result.into_text())
    }

    /// Code review agent
    pub async fn code_review(&self, filename: &str, content: &str) -> AgentOutput {
        self.run(AnalysisKind::CodeReview, filename, content).await
    }

    /// Vulnerability scan agent
    pub async fn vulnerability(&self, filename: &str, content: &str) -> AgentOutput {
        self.run(AnalysisKind::Vulnerability, filename, content).await
    }

    /// Efficiency agent
    pub async fn efficiency(&self, filename: &str, content: &str) -> AgentOutput {
        self.run(AnalysisKind::Efficiency, filename, content).await
    }

    /// Impact analysis agent
    pub async fn impact(&self, filename: &str, content: &str) -> AgentOutput {
        self.run(AnalysisKind::Impact, filename, content).await
    }
}

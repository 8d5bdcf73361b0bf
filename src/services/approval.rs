//! Approval agent: asks the model for a verdict over the four analyses.

use std::sync::Arc;
use tracing::info;

use crate::domain::models::ApprovalOutput;
use crate::services::model_invoker::ModelInvoker;
use crate::services::prompts::approval_prompt;

/// Approver recorded when none is given
pub const DEFAULT_APPROVER: &str = "head@example.com";

/// Asks the model for an approve/reject verdict
pub struct ApprovalAgent {
    invoker: Arc<ModelInvoker>,
}

impl ApprovalAgent {
    pub fn new(invoker: Arc<ModelInvoker>) -> Self {
        Self { invoker }
    }

    /// Request a verdict.
    ///
    /// `approver` and `filename` are only logged; the prompt embeds the four
    /// analysis texts verbatim. An invocation failure yields its error text as
    /// the result, which classifies as rejected unless it happens to contain
    /// "approve".
    pub async fn request_approval(
        &self,
        approver: &str,
        filename: &str,
        review: &str,
        vulnerability: &str,
        efficiency: &str,
        impact: &str,
    ) -> ApprovalOutput {
        info!(approver, filename, "requesting approval");

        let prompt = approval_prompt(review, vulnerability, efficiency, impact);
        let reply = self.invoker.invoke(&prompt).await.into_text();
        let output = ApprovalOutput::from_reply(reply);

        info!(approver, filename, status = %output.status, "approval verdict");
        output
    }
}

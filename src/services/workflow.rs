//! Review workflow: upload, analysis, approval, gated deploy and audit.
//!
//! Stages run one after another; each model call is awaited before the next
//! starts.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::models::{ApprovalOutput, Config, DeployOutput, ReviewReport};
use crate::domain::{UploadError, WorkflowError};
use crate::infrastructure::audit::AuditWriter;
use crate::services::approval::ApprovalAgent;
use crate::services::deploy::DeployAgent;
use crate::services::model_invoker::ModelInvoker;
use crate::services::prompts::truncate_chars;
use crate::services::review_agents::{AnalysisKind, ReviewAgents};

/// A file accepted for review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Base name of the file
    pub filename: String,
    /// Content decoded as UTF-8 with invalid sequences dropped
    pub content: String,
}

impl UploadedFile {
    /// Accept raw bytes under `filename` if its extension is allowed
    pub fn new(
        filename: impl Into<String>,
        bytes: &[u8],
        allowed_extensions: &[String],
    ) -> Result<Self, UploadError> {
        let filename = filename.into();
        if !has_allowed_extension(&filename, allowed_extensions) {
            return Err(UploadError::UnsupportedExtension {
                filename,
                allowed: allowed_extensions.join(", "),
            });
        }

        Ok(Self {
            filename,
            content: decode_utf8_dropping_invalid(bytes),
        })
    }

    /// Read a file from disk
    pub async fn from_path(path: &Path, allowed_extensions: &[String]) -> Result<Self, UploadError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| UploadError::MissingFileName(path.to_path_buf()))?
            .to_string();

        // Reject before touching the filesystem
        if !has_allowed_extension(&filename, allowed_extensions) {
            return Err(UploadError::UnsupportedExtension {
                filename,
                allowed: allowed_extensions.join(", "),
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Self::new(filename, &bytes, allowed_extensions)
    }

    /// First `max_chars` characters of the content
    pub fn preview(&self, max_chars: usize) -> &str {
        truncate_chars(&self.content, max_chars)
    }
}

fn has_allowed_extension(filename: &str, allowed_extensions: &[String]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            allowed_extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Decode UTF-8, silently dropping invalid byte sequences
fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        decoded.push_str(chunk.valid());
    }
    decoded
}

/// Model server status shown before a review starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerStatus {
    /// Configured model name
    pub model: String,
    /// Whether the reachability probe succeeded
    pub reachable: bool,
}

/// Drives one file through upload, analysis, approval, deploy and audit
pub struct ReviewWorkflow {
    invoker: Arc<ModelInvoker>,
    agents: ReviewAgents,
    approval: ApprovalAgent,
    deployer: DeployAgent,
    audit: AuditWriter,
    allowed_extensions: Vec<String>,
    preview_chars: usize,
}

impl ReviewWorkflow {
    /// Build the workflow with the production invoker
    pub fn from_config(config: &Config) -> Result<Self> {
        let invoker = Arc::new(ModelInvoker::from_config(&config.model)?);
        Ok(Self::with_invoker(invoker, config))
    }

    /// Build the workflow around an existing invoker
    pub fn with_invoker(invoker: Arc<ModelInvoker>, config: &Config) -> Self {
        Self {
            agents: ReviewAgents::new(invoker.clone(), config.review.max_content_chars),
            approval: ApprovalAgent::new(invoker.clone()),
            deployer: DeployAgent::new(&config.output.deploy_dir),
            audit: AuditWriter::new(&config.output.audit_dir),
            allowed_extensions: config.review.allowed_extensions.clone(),
            preview_chars: config.review.preview_chars,
            invoker,
        }
    }

    /// Probe the model server
    pub async fn server_status(&self) -> ServerStatus {
        ServerStatus {
            model: self.invoker.model().to_string(),
            reachable: self.invoker.is_server_reachable().await,
        }
    }

    /// Read and validate a file from disk
    pub async fn upload(&self, path: &Path) -> Result<UploadedFile, UploadError> {
        let file = UploadedFile::from_path(path, &self.allowed_extensions).await?;
        info!(
            filename = %file.filename,
            chars = file.content.chars().count(),
            "file uploaded"
        );
        Ok(file)
    }

    /// Content preview shown before analysis
    pub fn preview<'a>(&self, file: &'a UploadedFile) -> &'a str {
        file.preview(self.preview_chars)
    }

    /// Run the four analyses in order
    pub async fn analyze(&self, file: &UploadedFile) -> ReviewReport {
        self.analyze_with_progress(file, |_| {}).await
    }

    /// Run the four analyses in order, calling `on_stage` before each one
    pub async fn analyze_with_progress<F>(&self, file: &UploadedFile, mut on_stage: F) -> ReviewReport
    where
        F: FnMut(AnalysisKind),
    {
        let span = info_span!("review", run_id = %Uuid::new_v4(), filename = %file.filename);

        async {
            info!("starting analysis");
            let (filename, content) = (file.filename.as_str(), file.content.as_str());

            on_stage(AnalysisKind::CodeReview);
            let review = self.agents.code_review(filename, content).await;
            on_stage(AnalysisKind::Vulnerability);
            let vulnerability = self.agents.vulnerability(filename, content).await;
            on_stage(AnalysisKind::Efficiency);
            let efficiency = self.agents.efficiency(filename, content).await;
            on_stage(AnalysisKind::Impact);
            let impact = self.agents.impact(filename, content).await;

            info!("analysis complete");
            ReviewReport {
                filename: file.filename.clone(),
                review,
                vulnerability,
                efficiency,
                impact,
            }
        }
        .instrument(span)
        .await
    }

    /// Ask for a verdict over a completed report
    pub async fn request_approval(&self, approver: &str, report: &ReviewReport) -> ApprovalOutput {
        self.approval
            .request_approval(
                approver,
                &report.filename,
                &report.review.result,
                &report.vulnerability.result,
                &report.efficiency.result,
                &report.impact.result,
            )
            .await
    }

    /// Deploy the file only when the verdict is approved
    pub async fn deploy(
        &self,
        file: &UploadedFile,
        approval: &ApprovalOutput,
    ) -> Result<DeployOutput, WorkflowError> {
        if !approval.status.is_approved() {
            warn!(filename = %file.filename, status = %approval.status, "deployment refused");
            return Err(WorkflowError::NotApproved(approval.status));
        }

        Ok(self
            .deployer
            .deploy(&file.filename, file.content.as_bytes(), approval)
            .await?)
    }

    /// Write the report as an audit document and return its path
    pub async fn save_audit(&self, report: &ReviewReport) -> Result<PathBuf, WorkflowError> {
        Ok(self.audit.save(report).await?)
    }
}

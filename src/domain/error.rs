use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while accepting a file for review
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Unsupported file type '{filename}'. Allowed extensions: {allowed}")]
    UnsupportedExtension { filename: String, allowed: String },

    #[error("Path has no file name: {0}")]
    MissingFileName(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while copying a file into the deployment directory
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Failed to create deployment directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write deployed file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while writing an audit document
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to create audit directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write audit file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Workflow-level errors
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Deployment refused: approval status is {0}")]
    NotApproved(crate::domain::models::Verdict),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

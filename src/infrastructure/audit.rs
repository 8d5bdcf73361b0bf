//! Audit documents for completed reviews
//!
//! Each save writes one pretty-printed JSON document embedding the four
//! analysis outputs, named `<filename>_<YYYYmmdd_HHMMSS>.json`.

use chrono::{DateTime, Local};
use std::path::PathBuf;
use tracing::info;

use crate::domain::models::ReviewReport;
use crate::domain::AuditError;

/// Timestamp format used in audit file names
const AUDIT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes audit documents into a directory
#[derive(Debug, Clone)]
pub struct AuditWriter {
    audit_dir: PathBuf,
}

impl AuditWriter {
    pub fn new(audit_dir: impl Into<PathBuf>) -> Self {
        Self {
            audit_dir: audit_dir.into(),
        }
    }

    /// Path the record would be written to at the given time
    pub fn audit_path(&self, filename: &str, timestamp: DateTime<Local>) -> PathBuf {
        self.audit_dir.join(format!(
            "{}_{}.json",
            filename,
            timestamp.format(AUDIT_TIMESTAMP_FORMAT)
        ))
    }

    /// Save the record stamped with the current local time
    pub async fn save(&self, record: &ReviewReport) -> Result<PathBuf, AuditError> {
        self.save_at(record, Local::now()).await
    }

    /// Save the record stamped with `timestamp`, overwriting an existing
    /// document with the same name
    pub async fn save_at(
        &self,
        record: &ReviewReport,
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf, AuditError> {
        tokio::fs::create_dir_all(&self.audit_dir)
            .await
            .map_err(|source| AuditError::CreateDir {
                path: self.audit_dir.clone(),
                source,
            })?;

        let path = self.audit_path(&record.filename, timestamp);
        let json = serde_json::to_string_pretty(record)?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| AuditError::Write {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), filename = %record.filename, "audit log saved");
        Ok(path)
    }
}

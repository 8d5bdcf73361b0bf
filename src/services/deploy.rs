//! Deploy agent: writes a reviewed file into the deployment directory.

use std::path::PathBuf;
use tracing::info;

use crate::domain::models::{ApprovalOutput, DeployOutput};
use crate::domain::DeployError;

/// Descriptive pipeline steps attached to every deploy output
pub const DEPLOYMENT_STEPS: [&str; 6] = [
    "Checkout commit / create branch",
    "Run tests",
    "Run DB migrations",
    "Canary deploy to staging",
    "Monitor logs and metrics",
    "Promote to production",
];

/// Copies approved files into the deployment directory
#[derive(Debug, Clone)]
pub struct DeployAgent {
    deploy_dir: PathBuf,
}

impl DeployAgent {
    pub fn new(deploy_dir: impl Into<PathBuf>) -> Self {
        Self {
            deploy_dir: deploy_dir.into(),
        }
    }

    /// Write `content` to `<deploy_dir>/<filename>`, overwriting any previous
    /// copy.
    ///
    /// The approval is embedded in the output but not checked here; gating on
    /// the verdict is the caller's job.
    pub async fn deploy(
        &self,
        filename: &str,
        content: &[u8],
        approval: &ApprovalOutput,
    ) -> Result<DeployOutput, DeployError> {
        tokio::fs::create_dir_all(&self.deploy_dir)
            .await
            .map_err(|source| DeployError::CreateDir {
                path: self.deploy_dir.clone(),
                source,
            })?;

        let deployed_path = self.deploy_dir.join(filename);
        tokio::fs::write(&deployed_path, content)
            .await
            .map_err(|source| DeployError::Write {
                path: deployed_path.clone(),
                source,
            })?;

        info!(path = %deployed_path.display(), "deployed file");

        Ok(DeployOutput::new(
            deployed_path,
            DEPLOYMENT_STEPS.iter().map(|step| step.to_string()).collect(),
            approval.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AgentLabel;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_deploy_writes_file_and_steps() {
        let temp_dir = TempDir::new().unwrap();
        let agent = DeployAgent::new(temp_dir.path().join("deployed"));
        let approval = ApprovalOutput::from_reply("approve");

        let output = agent
            .deploy("App.java", b"class App {}", &approval)
            .await
            .unwrap();

        assert_eq!(output.agent(), AgentLabel::Deploy);
        assert_eq!(output.deployed_path, temp_dir.path().join("deployed/App.java"));
        assert_eq!(output.steps.len(), 6);
        assert_eq!(output.steps[0], "Checkout commit / create branch");
        assert_eq!(output.approval, approval);
        assert_eq!(std::fs::read(&output.deployed_path).unwrap(), b"class App {}");
    }

    #[tokio::test]
    async fn test_redeploy_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let agent = DeployAgent::new(temp_dir.path());
        let approval = ApprovalOutput::from_reply("approve");

        agent.deploy("app.js", b"first version", &approval).await.unwrap();
        let output = agent.deploy("app.js", b"v2", &approval).await.unwrap();

        assert_eq!(std::fs::read(output.deployed_path).unwrap(), b"v2");
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let agent = DeployAgent::new(blocker.join("deployed"));

        let result = agent
            .deploy("App.java", b"x", &ApprovalOutput::from_reply("approve"))
            .await;

        assert!(matches!(result, Err(DeployError::CreateDir { .. })));
    }

    #[test]
    fn test_output_json_shape() {
        let output = DeployOutput::new(
            PathBuf::from("deployed/App.java"),
            DEPLOYMENT_STEPS.iter().map(|s| s.to_string()).collect(),
            ApprovalOutput::from_reply("approve"),
        );
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["agent"], "deploy");
        assert_eq!(json["deployed_path"], "deployed/App.java");
        assert_eq!(json["steps"][5], "Promote to production");
        assert_eq!(json["approval"]["status"], "approved");
    }
}

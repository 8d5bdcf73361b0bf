//! Application services: model invocation, agents and the review workflow.

pub mod approval;
pub mod deploy;
pub mod model_invoker;
pub mod prompts;
pub mod review_agents;
pub mod workflow;

pub use approval::{ApprovalAgent, DEFAULT_APPROVER};
pub use deploy::{DeployAgent, DEPLOYMENT_STEPS};
pub use model_invoker::{
    InvocationOutcome, InvocationResult, ModelInvoker, CHAT_API_ERROR_PREFIX,
    SERVER_UNREACHABLE_MESSAGE,
};
pub use review_agents::{AnalysisKind, ReviewAgents, DEFAULT_MAX_CONTENT_CHARS};
pub use workflow::{ReviewWorkflow, ServerStatus, UploadedFile};

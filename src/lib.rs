//! redeploy - a deployment refresh orchestrator for compose-managed services

pub mod cli;
pub mod core;
pub mod execution;
pub mod ops;

// Re-export commonly used types
pub use crate::core::{DeployConfig, DeployPlan, PipelineStep, RunOutcome, RunStatus, StepResult};
pub use crate::execution::{PipelineDriver, PipelineEvent, TailEnd};
pub use crate::ops::{ExternalOp, LogSource, LogTailHandle, OpError, OpOutput};

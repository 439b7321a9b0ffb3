//! Step domain model

use crate::ops::{ExternalOp, OpError, OpOutput};
use std::fmt;
use std::sync::Arc;

/// A single step in the update pipeline
///
/// Steps are ordered and immutable for the run. A `fatal` step's failure
/// halts everything after it; a non-fatal step's failure is recorded as a
/// warning and the run continues.
#[derive(Clone)]
pub struct PipelineStep {
    /// Step name, used in progress messages and outcomes
    pub name: String,

    /// Whether failure of this step aborts the run
    pub fatal: bool,

    /// The opaque external operation this step wraps
    pub action: Arc<dyn ExternalOp>,
}

impl PipelineStep {
    /// A step whose failure aborts the run
    pub fn fatal(name: &str, action: Arc<dyn ExternalOp>) -> Self {
        Self {
            name: name.to_string(),
            fatal: true,
            action,
        }
    }

    /// A step whose failure is logged but does not abort the run
    pub fn best_effort(name: &str, action: Arc<dyn ExternalOp>) -> Self {
        Self {
            name: name.to_string(),
            fatal: false,
            action,
        }
    }
}

impl fmt::Debug for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineStep")
            .field("name", &self.name)
            .field("fatal", &self.fatal)
            .field("action", &self.action.describe())
            .finish()
    }
}

/// Result of executing one step, consumed by the gating logic
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Name of the step that produced this result
    pub step: String,

    /// Whether the external operation reported success
    pub succeeded: bool,

    /// Exit code from the external tool (-1 when it never ran)
    pub exit_code: i32,

    /// Captured output of the operation
    pub output: String,
}

impl StepResult {
    /// Result for an operation that ran to completion
    pub fn from_output(step: &str, output: &OpOutput) -> Self {
        Self {
            step: step.to_string(),
            succeeded: output.success(),
            exit_code: output.exit_code,
            output: output.stdout.clone(),
        }
    }

    /// Result for an operation that could not run at all
    pub fn from_error(step: &str, error: &OpError) -> Self {
        Self {
            step: step.to_string(),
            succeeded: false,
            exit_code: -1,
            output: error.to_string(),
        }
    }
}

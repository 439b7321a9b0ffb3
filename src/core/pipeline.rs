//! Deploy plan domain model

use crate::core::config::DeployConfig;
use crate::core::step::PipelineStep;
use crate::ops::{BuildAndRestart, ComposeLogs, LogSource, PruneUnused, QueryStatus, SyncSource};
use std::sync::Arc;
use std::time::Duration;

/// Step names for the standard update pipeline
pub const STEP_SYNC: &str = "sync source";
pub const STEP_BUILD: &str = "build and restart";
pub const STEP_PRUNE: &str = "prune unused images";
pub const STEP_STATUS: &str = "query status";

/// The resolved plan for one deploy run
///
/// An ordered sequence of external operations plus the log stream observed
/// once they have run. Control flows top to bottom with no branching beyond
/// the fatal gates.
#[derive(Clone)]
pub struct DeployPlan {
    /// Plan name, shown when the run starts
    pub name: String,

    /// Ordered steps, immutable for the run
    pub steps: Vec<PipelineStep>,

    /// Log stream tailed after the last step
    pub logs: Arc<dyn LogSource>,

    /// Bound on the post-deploy log tail
    pub tail: Duration,
}

impl DeployPlan {
    /// Build the standard five-phase update pipeline from configuration
    pub fn from_config(config: &DeployConfig) -> Self {
        let steps = vec![
            PipelineStep::fatal(STEP_SYNC, Arc::new(SyncSource::new(config))),
            PipelineStep::fatal(STEP_BUILD, Arc::new(BuildAndRestart::new(config))),
            PipelineStep::best_effort(STEP_PRUNE, Arc::new(PruneUnused::new(config))),
            PipelineStep::best_effort(STEP_STATUS, Arc::new(QueryStatus::new(config))),
        ];

        Self {
            name: format!("refresh {}", config.service),
            steps,
            logs: Arc::new(ComposeLogs::new(config)),
            tail: Duration::from_secs(config.tail_secs),
        }
    }

    /// Plan with explicit steps and log source (used by tests and embedders)
    pub fn new(
        name: &str,
        steps: Vec<PipelineStep>,
        logs: Arc<dyn LogSource>,
        tail: Duration,
    ) -> Self {
        Self {
            name: name.to_string(),
            steps,
            logs,
            tail,
        }
    }

    /// Look up a step by name
    pub fn step(&self, name: &str) -> Option<&PipelineStep> {
        self.steps.iter().find(|s| s.name == name)
    }
}

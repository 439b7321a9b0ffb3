//! Run outcome model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Status of a deploy run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is in progress
    Running,
    /// All fatal steps succeeded
    Completed,
    /// A fatal step failed
    Failed,
}

/// Terminal record of one deploy run
///
/// Produced once per invocation; the process exits carrying this as its
/// exit status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Unique id for this run
    pub run_id: Uuid,

    /// Current status
    pub status: RunStatus,

    /// The fatal step that halted the run, if any
    pub failed_step: Option<String>,

    /// Non-fatal failures recorded along the way
    pub warnings: Vec<String>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunOutcome {
    /// Start tracking a new run
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status: RunStatus::Running,
            failed_step: None,
            warnings: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Mark the run as completed
    pub fn complete(&mut self) {
        self.status = RunStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the run as failed at the given step
    pub fn fail(&mut self, step: &str) {
        self.status = RunStatus::Failed;
        self.failed_step = Some(step.to_string());
        self.finished_at = Some(Utc::now());
    }

    /// Record a non-fatal failure
    pub fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Whether the run completed (all fatal steps succeeded)
    pub fn completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Total wall-clock duration of the run
    pub fn duration(&self) -> Duration {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        end.signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Process exit status for this run: 0 iff completed
    pub fn exit_code(&self) -> i32 {
        if self.completed() {
            0
        } else {
            1
        }
    }
}

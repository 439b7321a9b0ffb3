//! Pipeline driver - executes the deploy plan and enforces gating policy

use crate::{
    core::{DeployPlan, RunOutcome, StepResult},
    execution::tail::{bounded_tail, TailEnd},
};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Events that can occur during a deploy run
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    RunStarted {
        run_id: Uuid,
        plan_name: String,
    },
    StepStarted {
        step: String,
        command: String,
    },
    /// Captured output of a completed step (status listing, pull summary)
    StepOutput {
        step: String,
        output: String,
    },
    StepCompleted {
        step: String,
    },
    /// A step failed; `fatal` tells whether the run halts here
    StepFailed {
        step: String,
        error: String,
        fatal: bool,
    },
    TailStarted {
        stream: String,
        bound_secs: u64,
    },
    /// One live log line from the observed service
    LogLine {
        line: String,
    },
    TailFinished {
        end: TailEnd,
    },
    /// Attaching to the log stream failed; the run is unaffected
    TailFailed {
        error: String,
    },
    RunCompleted {
        run_id: Uuid,
        completed: bool,
        warnings: usize,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(PipelineEvent) + Send + Sync>;

/// Executes a deploy plan: steps strictly in order, fail-fast on fatal
/// steps, then the bounded log tail
///
/// The driver itself mutates nothing external; it sequences the opaque
/// operations and reports what happened.
pub struct PipelineDriver {
    event_handlers: Vec<EventHandler>,
    cancel: Arc<Notify>,
}

impl PipelineDriver {
    pub fn new() -> Self {
        Self {
            event_handlers: Vec::new(),
            cancel: Arc::new(Notify::new()),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(PipelineEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Handle used to cancel the log tail early (e.g., wired to Ctrl-C)
    pub fn cancel_handle(&self) -> Arc<Notify> {
        self.cancel.clone()
    }

    /// Emit an event to all handlers
    fn emit(&self, event: PipelineEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the plan and produce the run's terminal outcome
    pub async fn execute(&self, plan: &DeployPlan) -> RunOutcome {
        let mut outcome = RunOutcome::start();

        info!("Starting deploy run: {} ({})", plan.name, outcome.run_id);
        self.emit(PipelineEvent::RunStarted {
            run_id: outcome.run_id,
            plan_name: plan.name.clone(),
        });

        for step in &plan.steps {
            self.emit(PipelineEvent::StepStarted {
                step: step.name.clone(),
                command: step.action.describe(),
            });

            let result = match step.action.execute().await {
                Ok(output) if output.success() => StepResult::from_output(&step.name, &output),
                Ok(output) => {
                    let mut result = StepResult::from_output(&step.name, &output);
                    result.output = output.failure_summary();
                    result
                }
                Err(e) => StepResult::from_error(&step.name, &e),
            };

            if result.succeeded {
                info!("Step completed: {}", step.name);
                if !result.output.trim().is_empty() {
                    self.emit(PipelineEvent::StepOutput {
                        step: step.name.clone(),
                        output: result.output.clone(),
                    });
                }
                self.emit(PipelineEvent::StepCompleted {
                    step: step.name.clone(),
                });
                continue;
            }

            self.emit(PipelineEvent::StepFailed {
                step: step.name.clone(),
                error: result.output.clone(),
                fatal: step.fatal,
            });

            if step.fatal {
                error!("Fatal step failed: {}: {}", step.name, result.output);
                outcome.fail(&step.name);
                self.emit(PipelineEvent::RunCompleted {
                    run_id: outcome.run_id,
                    completed: false,
                    warnings: outcome.warnings.len(),
                });
                return outcome;
            }

            warn!("Step failed (continuing): {}: {}", step.name, result.output);
            outcome.warn(format!("{}: {}", step.name, result.output));
        }

        self.tail_logs(plan, &mut outcome).await;

        outcome.complete();
        info!(
            "Deploy run finished: {} ({} warnings)",
            plan.name,
            outcome.warnings.len()
        );
        self.emit(PipelineEvent::RunCompleted {
            run_id: outcome.run_id,
            completed: true,
            warnings: outcome.warnings.len(),
        });

        outcome
    }

    /// Observe the service's logs for the plan's bounded window
    ///
    /// Inherently non-fatal: a stream we cannot attach to is reported and
    /// the run still completes.
    async fn tail_logs(&self, plan: &DeployPlan, outcome: &mut RunOutcome) {
        if plan.tail.is_zero() {
            info!("Log tail disabled, skipping");
            return;
        }

        self.emit(PipelineEvent::TailStarted {
            stream: plan.logs.describe(),
            bound_secs: plan.tail.as_secs(),
        });

        let result = bounded_tail(plan.logs.as_ref(), plan.tail, &self.cancel, |line| {
            self.emit(PipelineEvent::LogLine { line });
        })
        .await;

        match result {
            Ok(end) => self.emit(PipelineEvent::TailFinished { end }),
            Err(e) => {
                warn!("Could not attach to log stream: {}", e);
                outcome.warn(format!("log tail: {}", e));
                self.emit(PipelineEvent::TailFailed {
                    error: e.to_string(),
                });
            }
        }
    }
}

impl Default for PipelineDriver {
    fn default() -> Self {
        Self::new()
    }
}

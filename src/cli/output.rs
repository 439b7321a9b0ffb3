//! CLI output formatting

use crate::core::RunOutcome;
use crate::execution::{PipelineEvent, TailEnd};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a pipeline event for display
pub fn format_pipeline_event(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::RunStarted { run_id, plan_name } => format!(
            "{} Starting {} ({})",
            ROCKET,
            style(plan_name).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        PipelineEvent::StepStarted { step, command } => format!(
            "{} {} {}",
            SPINNER,
            style(step).cyan(),
            style(format!("[{}]", command)).dim()
        ),
        PipelineEvent::StepOutput { step, output } => {
            format!("{} Output from {}:\n{}", INFO, style(step).dim(), indent(output))
        }
        PipelineEvent::StepCompleted { step } => {
            format!("{} {}", CHECK, style(step).green())
        }
        PipelineEvent::StepFailed { step, error, fatal } => {
            if *fatal {
                format!("{} {}: {}", CROSS, style(step).red(), style(error).dim())
            } else {
                format!(
                    "{} {} failed (continuing): {}",
                    WARN,
                    style(step).yellow(),
                    style(error).dim()
                )
            }
        }
        PipelineEvent::TailStarted { stream, bound_secs } => format!(
            "{} Tailing logs for {}s {}",
            INFO,
            bound_secs,
            style(format!("[{}]", stream)).dim()
        ),
        PipelineEvent::LogLine { line } => format!("  {}", style(line).dim()),
        PipelineEvent::TailFinished { end } => {
            let reason = match end {
                TailEnd::BoundElapsed => "window elapsed",
                TailEnd::StreamClosed => "stream closed",
                TailEnd::Cancelled => "cancelled",
            };
            format!("{} Log tail finished ({})", INFO, reason)
        }
        PipelineEvent::TailFailed { error } => format!(
            "{} Could not attach to logs: {}",
            WARN,
            style(error).dim()
        ),
        PipelineEvent::RunCompleted {
            completed,
            warnings,
            ..
        } => {
            let status = if *completed {
                style("completed").green().to_string()
            } else {
                style("failed").red().to_string()
            };
            if *warnings > 0 {
                format!(
                    "{} Pipeline {} ({} warnings)",
                    INFO,
                    status,
                    style(warnings).yellow()
                )
            } else {
                format!("{} Pipeline {}", INFO, status)
            }
        }
    }
}

/// Final summary line for a finished run
pub fn format_outcome(plan_name: &str, outcome: &RunOutcome) -> String {
    if outcome.completed() {
        format!(
            "{} {} {} in {:.1}s",
            CHECK,
            style(plan_name).bold(),
            style("succeeded").green(),
            outcome.duration().as_secs_f64()
        )
    } else {
        format!(
            "{} {} {} at step {}",
            CROSS,
            style(plan_name).bold(),
            style("failed").red(),
            style(outcome.failed_step.as_deref().unwrap_or("?")).bold()
        )
    }
}

fn indent(text: &str) -> String {
    text.trim_end()
        .lines()
        .map(|l| format!("  {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

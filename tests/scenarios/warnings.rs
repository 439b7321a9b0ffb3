//! Test: non-fatal failures surface as warnings without touching exit status

use crate::helpers::*;
use redeploy::core::PipelineStep;
use redeploy::execution::PipelineEvent;
use std::time::Duration;

/// Scenario: sync and build succeed, prune fails, status succeeds, logs
/// tail cleanly - the run completes with a single prune warning
#[tokio::test(start_paused = true)]
async fn test_prune_failure_warns_but_run_succeeds() {
    let calls = call_log();
    let plan = scripted_plan(
        vec![
            PipelineStep::fatal("sync source", ScriptedOp::succeeding("sync source", &calls)),
            PipelineStep::fatal(
                "build and restart",
                ScriptedOp::succeeding("build and restart", &calls),
            ),
            PipelineStep::best_effort(
                "prune unused images",
                ScriptedOp::failing("prune unused images", 1, &calls),
            ),
            PipelineStep::best_effort(
                "query status",
                ScriptedOp::succeeding("query status", &calls),
            ),
        ],
        ScriptedLogSource::with_lines(
            vec![(Duration::from_secs(1), "service started".to_string())],
            None,
        ),
        Duration::from_secs(10),
    );

    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert_eq!(record.outcome.warnings.len(), 1);
    assert_warned(&record, "prune unused images");
    assert_eq!(record.log_lines(), vec!["service started".to_string()]);
}

/// The container status listing is forwarded as step output
#[tokio::test]
async fn test_status_listing_is_reported() {
    let calls = call_log();
    let listing = "NAME   STATUS\nbot    Up 3 seconds\n";
    let plan = scripted_plan(
        vec![PipelineStep::best_effort(
            "query status",
            ScriptedOp::succeeding_with_output("query status", listing, &calls),
        )],
        ScriptedLogSource::closed(),
        Duration::from_secs(1),
    );

    let record = run_plan(&plan).await;

    assert_completed(&record);
    let reported = record.events.iter().any(|e| {
        matches!(
            e,
            PipelineEvent::StepOutput { step, output }
                if step == "query status" && output.contains("Up 3 seconds")
        )
    });
    assert!(reported, "status listing should be emitted as step output");
}

/// A failed status query is treated like a failed prune: warn and move on
#[tokio::test]
async fn test_status_failure_is_non_fatal() {
    let calls = call_log();
    let plan = scripted_plan(
        vec![
            PipelineStep::fatal("sync source", ScriptedOp::succeeding("sync source", &calls)),
            PipelineStep::best_effort(
                "query status",
                ScriptedOp::failing("query status", 1, &calls),
            ),
        ],
        ScriptedLogSource::closed(),
        Duration::from_secs(1),
    );

    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert_warned(&record, "query status");
}

/// A log stream that cannot be attached to reports a warning, not a failure
#[tokio::test]
async fn test_log_attach_failure_is_non_fatal() {
    let calls = call_log();
    let plan = scripted_plan(
        vec![PipelineStep::fatal(
            "sync source",
            ScriptedOp::succeeding("sync source", &calls),
        )],
        ScriptedLogSource::unattachable(),
        Duration::from_secs(10),
    );

    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert_warned(&record, "log tail");
    let tail_failed = record
        .events
        .iter()
        .any(|e| matches!(e, PipelineEvent::TailFailed { .. }));
    assert!(tail_failed, "tail failure should be surfaced as an event");
}

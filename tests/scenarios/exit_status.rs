//! Test: exit status is 0 iff both fatal steps succeed

use crate::helpers::*;
use redeploy::core::PipelineStep;
use std::time::Duration;

fn full_plan(
    sync_code: i32,
    build_code: i32,
    prune_code: i32,
    status_code: i32,
    calls: &CallLog,
) -> redeploy::DeployPlan {
    scripted_plan(
        vec![
            PipelineStep::fatal(
                "sync source",
                if sync_code == 0 {
                    ScriptedOp::succeeding("sync source", calls)
                } else {
                    ScriptedOp::failing("sync source", sync_code, calls)
                },
            ),
            PipelineStep::fatal(
                "build and restart",
                if build_code == 0 {
                    ScriptedOp::succeeding("build and restart", calls)
                } else {
                    ScriptedOp::failing("build and restart", build_code, calls)
                },
            ),
            PipelineStep::best_effort(
                "prune unused images",
                if prune_code == 0 {
                    ScriptedOp::succeeding("prune unused images", calls)
                } else {
                    ScriptedOp::failing("prune unused images", prune_code, calls)
                },
            ),
            PipelineStep::best_effort(
                "query status",
                if status_code == 0 {
                    ScriptedOp::succeeding("query status", calls)
                } else {
                    ScriptedOp::failing("query status", status_code, calls)
                },
            ),
        ],
        ScriptedLogSource::closed(),
        Duration::from_secs(1),
    )
}

/// Every non-fatal step failing at once still yields exit status 0
#[tokio::test]
async fn test_exit_zero_despite_all_non_fatal_failures() {
    let calls = call_log();
    let plan = full_plan(0, 0, 1, 1, &calls);

    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert_eq!(record.outcome.warnings.len(), 2);
}

/// Sync failure is exit status 1 even if everything else would have passed
#[tokio::test]
async fn test_exit_one_on_sync_failure() {
    let calls = call_log();
    let plan = full_plan(128, 0, 0, 0, &calls);

    let record = run_plan(&plan).await;

    assert_failed_at(&record, "sync source");
}

/// Build failure is exit status 1
#[tokio::test]
async fn test_exit_one_on_build_failure() {
    let calls = call_log();
    let plan = full_plan(0, 2, 0, 0, &calls);

    let record = run_plan(&plan).await;

    assert_failed_at(&record, "build and restart");
}

/// The all-green run: exit status 0, no warnings
#[tokio::test]
async fn test_exit_zero_on_clean_run() {
    let calls = call_log();
    let plan = full_plan(0, 0, 0, 0, &calls);

    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert!(record.outcome.warnings.is_empty());
    assert_eq!(executed(&calls).len(), 4);
}

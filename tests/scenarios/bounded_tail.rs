//! Test: bounded log tail always returns control within the configured window

use crate::helpers::*;
use redeploy::core::PipelineStep;
use redeploy::execution::{PipelineEvent, TailEnd};
use std::time::Duration;

fn tail_end(record: &RunRecord) -> Option<TailEnd> {
    record.events.iter().find_map(|e| match e {
        PipelineEvent::TailFinished { end } => Some(*end),
        _ => None,
    })
}

/// A stream that never closes cannot hold the run past the bound
#[tokio::test(start_paused = true)]
async fn test_endless_stream_returns_at_bound() {
    let calls = call_log();
    let plan = scripted_plan(
        vec![PipelineStep::fatal(
            "sync source",
            ScriptedOp::succeeding("sync source", &calls),
        )],
        ScriptedLogSource::endless(),
        Duration::from_secs(10),
    );

    let start = tokio::time::Instant::now();
    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert_eq!(tail_end(&record), Some(TailEnd::BoundElapsed));
    assert!(start.elapsed() >= Duration::from_secs(10));
    assert!(start.elapsed() < Duration::from_secs(11));
}

/// Scenario: stream closes after 3s with a 10s bound - the run returns
/// success no later than the bound
#[tokio::test(start_paused = true)]
async fn test_stream_closing_early_returns_before_bound() {
    let calls = call_log();
    let plan = scripted_plan(
        vec![
            PipelineStep::fatal("sync source", ScriptedOp::succeeding("sync source", &calls)),
            PipelineStep::fatal(
                "build and restart",
                ScriptedOp::succeeding("build and restart", &calls),
            ),
        ],
        ScriptedLogSource::with_lines(
            vec![
                (Duration::from_secs(1), "starting".to_string()),
                (Duration::from_secs(1), "ready".to_string()),
            ],
            Some(Duration::from_secs(1)),
        ),
        Duration::from_secs(10),
    );

    let start = tokio::time::Instant::now();
    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert_eq!(tail_end(&record), Some(TailEnd::StreamClosed));
    assert_eq!(
        record.log_lines(),
        vec!["starting".to_string(), "ready".to_string()]
    );
    assert!(start.elapsed() <= Duration::from_secs(10));
}

/// Operator cancellation detaches immediately and is not an error
#[tokio::test(start_paused = true)]
async fn test_cancellation_detaches_early() {
    let calls = call_log();
    let plan = scripted_plan(
        vec![PipelineStep::fatal(
            "sync source",
            ScriptedOp::succeeding("sync source", &calls),
        )],
        ScriptedLogSource::endless(),
        Duration::from_secs(60),
    );

    let start = tokio::time::Instant::now();
    let record = run_plan_with_cancel(&plan, Some(Duration::from_secs(2))).await;

    assert_completed(&record);
    assert_eq!(tail_end(&record), Some(TailEnd::Cancelled));
    assert!(start.elapsed() < Duration::from_secs(60));
}

/// Lines received before the bound are all forwarded
#[tokio::test(start_paused = true)]
async fn test_lines_within_window_are_forwarded() {
    let calls = call_log();
    let plan = scripted_plan(
        vec![PipelineStep::fatal(
            "sync source",
            ScriptedOp::succeeding("sync source", &calls),
        )],
        ScriptedLogSource::with_lines(
            vec![
                (Duration::from_secs(1), "one".to_string()),
                (Duration::from_secs(2), "two".to_string()),
                // This one arrives after the bound and must not appear
                (Duration::from_secs(10), "three".to_string()),
            ],
            None,
        ),
        Duration::from_secs(5),
    );

    let record = run_plan(&plan).await;

    assert_completed(&record);
    assert_eq!(
        record.log_lines(),
        vec!["one".to_string(), "two".to_string()]
    );
}

//! Bounded log tail - time-limited observation of a live stream
//!
//! Attaches to a log stream, forwards every line it receives, and returns
//! control once the bound elapses no matter what the stream is doing.
//! Detaching drops the handle; the observed service is never signalled.

use crate::ops::{LogSource, OpError};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::debug;

/// Why the tail returned control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailEnd {
    /// The duration bound elapsed
    BoundElapsed,
    /// The stream closed before the bound
    StreamClosed,
    /// External cancellation (operator-initiated), not an error
    Cancelled,
}

/// Tail a log stream for at most `bound`, forwarding lines to `sink`
///
/// Returns early when the stream closes or `cancel` fires; an attach
/// failure is the only error case.
pub async fn bounded_tail<F>(
    source: &dyn LogSource,
    bound: Duration,
    cancel: &Notify,
    mut sink: F,
) -> Result<TailEnd, OpError>
where
    F: FnMut(String),
{
    let mut handle = source.attach().await?;
    debug!("Tailing `{}` for {:?}", source.describe(), bound);

    let deadline = tokio::time::sleep(bound);
    tokio::pin!(deadline);

    let end = loop {
        tokio::select! {
            _ = &mut deadline => break TailEnd::BoundElapsed,
            _ = cancel.notified() => break TailEnd::Cancelled,
            line = handle.next_line() => match line {
                Some(line) => sink(line),
                None => break TailEnd::StreamClosed,
            },
        }
    };

    debug!("Detaching from log stream: {:?}", end);
    Ok(end)
}

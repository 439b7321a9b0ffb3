//! Adapters over the external collaborators (version control, container runtime)

pub mod compose;
pub mod git;
pub mod process;
pub mod result;

use async_trait::async_trait;
use tokio::process::Child;
use tokio::sync::mpsc;

pub use compose::{BuildAndRestart, ComposeLogs, PruneUnused, QueryStatus};
pub use git::SyncSource;
pub use process::ProcessRunner;
pub use result::{OpError, OpOutput};

/// One opaque external operation - the seam that makes the pipeline
/// unit-testable without real external tools.
///
/// Production adapters shell out; test adapters return scripted results.
/// Adapters never retry: retries, if desired, belong to whoever wraps the
/// driver.
#[async_trait]
pub trait ExternalOp: Send + Sync {
    /// Human-readable description of the underlying command
    fn describe(&self) -> String;

    /// Run the operation to completion and capture its result
    async fn execute(&self) -> Result<OpOutput, OpError>;
}

/// A live log stream that can be attached to
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Human-readable description of the stream
    fn describe(&self) -> String;

    /// Attach to the stream, yielding a handle that delivers lines
    async fn attach(&self) -> Result<LogTailHandle, OpError>;
}

/// Handle to an attached log stream
///
/// Dropping the handle detaches from the stream. For subprocess-backed
/// sources the follower process is killed on drop; the service it was
/// observing is never signalled.
pub struct LogTailHandle {
    lines: mpsc::Receiver<String>,
    _follower: Option<Child>,
}

impl LogTailHandle {
    /// Handle over a bare line channel (scripted sources)
    pub fn new(lines: mpsc::Receiver<String>) -> Self {
        Self {
            lines,
            _follower: None,
        }
    }

    /// Handle that owns the follower subprocess feeding the channel
    pub fn with_follower(lines: mpsc::Receiver<String>, follower: Child) -> Self {
        Self {
            lines,
            _follower: Some(follower),
        }
    }

    /// Receive the next line; `None` means the stream closed
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }
}

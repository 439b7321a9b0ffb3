//! Adapter output and error types

use thiserror::Error;

/// Error types for external operations
#[derive(Debug, Error)]
pub enum OpError {
    #[error("failed to launch `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    #[error("timeout after {seconds} seconds running `{command}`")]
    Timeout { command: String, seconds: u64 },

    #[error("output from `{command}` is not valid UTF-8")]
    Utf8 { command: String },
}

/// Captured result of one external operation
///
/// A non-zero exit code is not an `OpError`: the tool ran and reported
/// failure, and it is the driver's gating policy that decides what that
/// means for the run.
#[derive(Debug, Clone)]
pub struct OpOutput {
    /// Exit code reported by the external tool (-1 if none was available)
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl OpOutput {
    /// Whether the operation reported success
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Short failure description for operator-facing messages
    pub fn failure_summary(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exited with code {}", self.exit_code)
        } else {
            format!("exited with code {}: {}", self.exit_code, stderr)
        }
    }
}

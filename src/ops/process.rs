//! Subprocess runner - every shelling-out adapter funnels through here

use crate::ops::result::{OpError, OpOutput};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Runs one external command and captures its result
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    /// Program to execute (e.g., "git", "docker")
    program: String,

    /// Arguments passed to the program
    args: Vec<String>,

    /// Working directory for the command, if any
    cwd: Option<PathBuf>,

    /// Optional timeout; the deploy pipeline leaves this off, matching the
    /// observed contract that sync/build/prune block until done
    timeout_secs: Option<u64>,
}

impl ProcessRunner {
    /// Create a runner for a program and its arguments
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            timeout_secs: None,
        }
    }

    /// Set the working directory for the command
    pub fn current_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Bound the command's wall-clock runtime
    #[allow(dead_code)]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// The command line this runner will execute
    pub fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Run the command to completion, capturing exit code and output
    ///
    /// A non-zero exit code is returned as a successful `OpOutput`; `Err` is
    /// reserved for the command not running at all (spawn failure, timeout,
    /// undecodable output).
    pub async fn run(&self) -> Result<OpOutput, OpError> {
        let command_line = self.describe();
        debug!("Running `{}`", command_line);

        let mut command = Command::new(&self.program);
        command.args(&self.args).kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let output = match self.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), command.output())
                .await
                .map_err(|_| OpError::Timeout {
                    command: command_line.clone(),
                    seconds: secs,
                })?,
            None => command.output().await,
        };

        let output = output.map_err(|e| OpError::Spawn {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        if exit_code != 0 {
            warn!(
                "`{}` exited with code {}",
                command_line, exit_code
            );
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| OpError::Utf8 {
            command: command_line.clone(),
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(
            "`{}` finished: code {}, {} bytes of stdout",
            command_line,
            exit_code,
            stdout.len()
        );

        Ok(OpOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

//! Container runtime adapters - build/restart, prune, status, log follow

use crate::core::config::DeployConfig;
use crate::ops::process::ProcessRunner;
use crate::ops::result::{OpError, OpOutput};
use crate::ops::{ExternalOp, LogSource, LogTailHandle};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

/// Buffered lines between the follower subprocess and the tail loop
const LOG_CHANNEL_CAPACITY: usize = 64;

fn compose_runner<I, S>(config: &DeployConfig, args: I) -> ProcessRunner
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut full: Vec<String> = vec![
        "compose".to_string(),
        "-f".to_string(),
        config.compose_file.display().to_string(),
    ];
    full.extend(args.into_iter().map(Into::into));
    ProcessRunner::new("docker", full).current_dir(&config.working_tree)
}

/// Rebuilds service images and restarts the container set
///
/// Wraps `docker compose up -d --build`; a build error or a container that
/// fails to start surfaces as a non-zero exit.
#[derive(Debug, Clone)]
pub struct BuildAndRestart {
    runner: ProcessRunner,
}

impl BuildAndRestart {
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            runner: compose_runner(config, ["up", "-d", "--build"]),
        }
    }
}

#[async_trait]
impl ExternalOp for BuildAndRestart {
    fn describe(&self) -> String {
        self.runner.describe()
    }

    async fn execute(&self) -> Result<OpOutput, OpError> {
        self.runner.run().await
    }
}

/// Prunes dangling images left behind by the rebuild
#[derive(Debug, Clone)]
pub struct PruneUnused {
    runner: ProcessRunner,
}

impl PruneUnused {
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            runner: ProcessRunner::new("docker", ["image", "prune", "-f"])
                .current_dir(&config.working_tree),
        }
    }
}

#[async_trait]
impl ExternalOp for PruneUnused {
    fn describe(&self) -> String {
        self.runner.describe()
    }

    async fn execute(&self) -> Result<OpOutput, OpError> {
        self.runner.run().await
    }
}

/// Lists the current container set
#[derive(Debug, Clone)]
pub struct QueryStatus {
    runner: ProcessRunner,
}

impl QueryStatus {
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            runner: compose_runner(config, ["ps"]),
        }
    }
}

#[async_trait]
impl ExternalOp for QueryStatus {
    fn describe(&self) -> String {
        self.runner.describe()
    }

    async fn execute(&self) -> Result<OpOutput, OpError> {
        self.runner.run().await
    }
}

/// Live log stream of one compose service
///
/// Attaching spawns `docker compose logs --follow <service>` with piped
/// stdout and forwards each line over a channel. The follower is killed when
/// the tail handle is dropped; the service itself is never signalled.
#[derive(Debug, Clone)]
pub struct ComposeLogs {
    compose_file: PathBuf,
    working_tree: PathBuf,
    service: String,
}

impl ComposeLogs {
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            compose_file: config.compose_file.clone(),
            working_tree: config.working_tree.clone(),
            service: config.service.clone(),
        }
    }
}

#[async_trait]
impl LogSource for ComposeLogs {
    fn describe(&self) -> String {
        format!(
            "docker compose -f {} logs --follow {}",
            self.compose_file.display(),
            self.service
        )
    }

    async fn attach(&self) -> Result<LogTailHandle, OpError> {
        let command_line = self.describe();
        debug!("Attaching to log stream: `{}`", command_line);

        let mut follower = Command::new("docker")
            .args([
                "compose",
                "-f",
                &self.compose_file.display().to_string(),
                "logs",
                "--follow",
                "--no-log-prefix",
                &self.service,
            ])
            .current_dir(&self.working_tree)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OpError::Spawn {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        let stdout = follower.stdout.take().ok_or_else(|| OpError::Spawn {
            command: command_line.clone(),
            reason: "no stdout pipe".to_string(),
        })?;

        let (tx, rx) = mpsc::channel(LOG_CHANNEL_CAPACITY);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
        });

        Ok(LogTailHandle::with_follower(rx, follower))
    }
}

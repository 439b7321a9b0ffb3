//! Source sync adapter - fetches the latest code into the working tree

use crate::core::config::DeployConfig;
use crate::ops::process::ProcessRunner;
use crate::ops::result::{OpError, OpOutput};
use crate::ops::ExternalOp;
use async_trait::async_trait;

/// Synchronizes the working tree with the remote source-of-truth
///
/// Wraps `git pull --ff-only`, optionally pinned to a remote and branch.
/// Fast-forward only: a diverged tree is a sync failure, not something this
/// tool resolves.
#[derive(Debug, Clone)]
pub struct SyncSource {
    runner: ProcessRunner,
}

impl SyncSource {
    pub fn new(config: &DeployConfig) -> Self {
        let mut args = vec!["pull".to_string(), "--ff-only".to_string()];
        if let Some(remote) = &config.git_remote {
            args.push(remote.clone());
            if let Some(branch) = &config.git_branch {
                args.push(branch.clone());
            }
        }

        Self {
            runner: ProcessRunner::new("git", args).current_dir(&config.working_tree),
        }
    }
}

#[async_trait]
impl ExternalOp for SyncSource {
    fn describe(&self) -> String {
        self.runner.describe()
    }

    async fn execute(&self) -> Result<OpOutput, OpError> {
        self.runner.run().await
    }
}

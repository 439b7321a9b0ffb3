//! Deploy configuration from YAML
//!
//! Every setting a deploy could take from ambient state (current directory,
//! implicit compose file) is made explicit here.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one deploy run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Working tree the sources are pulled into
    #[serde(default = "default_working_tree")]
    pub working_tree: PathBuf,

    /// Compose file defining the service set
    #[serde(default = "default_compose_file")]
    pub compose_file: PathBuf,

    /// Service whose logs are tailed after the deploy
    #[serde(default = "default_service")]
    pub service: String,

    /// How long the post-deploy log tail runs, in seconds
    #[serde(default = "default_tail_secs")]
    pub tail_secs: u64,

    /// Remote to pull from (git's own default when unset)
    #[serde(default)]
    pub git_remote: Option<String>,

    /// Branch to pull (requires `git_remote`)
    #[serde(default)]
    pub git_branch: Option<String>,
}

fn default_working_tree() -> PathBuf {
    PathBuf::from(".")
}

fn default_compose_file() -> PathBuf {
    PathBuf::from("docker-compose.yml")
}

fn default_service() -> String {
    "app".to_string()
}

fn default_tail_secs() -> u64 {
    10
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            working_tree: default_working_tree(),
            compose_file: default_compose_file(),
            service: default_service(),
            tail_secs: default_tail_secs(),
            git_remote: None,
            git_branch: None,
        }
    }
}

impl DeployConfig {
    /// Load deploy configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse deploy configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DeployConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            anyhow::bail!("service name must not be empty");
        }

        if self.tail_secs == 0 {
            anyhow::bail!("tail_secs must be greater than zero");
        }

        if self.git_branch.is_some() && self.git_remote.is_none() {
            anyhow::bail!("git_branch requires git_remote to be set");
        }

        Ok(())
    }
}

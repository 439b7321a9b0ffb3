//! CLI command definitions

use clap::Args;

/// Run the full update pipeline
#[derive(Debug, Args, Clone, Default)]
pub struct RunCommand {
    /// Working tree to pull into (overrides config)
    #[arg(long)]
    pub working_tree: Option<String>,

    /// Compose file to use (overrides config)
    #[arg(long)]
    pub compose_file: Option<String>,

    /// Service whose logs are tailed (overrides config)
    #[arg(long)]
    pub service: Option<String>,

    /// Log tail duration in seconds (overrides config)
    #[arg(long)]
    pub tail_secs: Option<u64>,

    /// Skip the post-deploy log tail
    #[arg(long)]
    pub no_tail: bool,
}

/// Show the resolved pipeline without executing it
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a deploy configuration file
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    /// Path to deploy configuration file
    #[arg(short, long)]
    pub file: String,

    /// Output the parsed configuration as JSON
    #[arg(long)]
    pub json: bool,
}

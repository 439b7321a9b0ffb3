//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{CheckCommand, PlanCommand, RunCommand};
use std::ffi::OsString;

/// Deployment refresh orchestrator for compose-managed services
#[derive(Debug, Parser, Clone)]
#[command(name = "redeploy")]
#[command(version = "0.1.0")]
#[command(about = "Pull, rebuild, restart and observe a compose-managed service", long_about = None)]
pub struct Cli {
    /// Running with no subcommand executes the full update pipeline
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to deploy configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the full update pipeline (the default)
    Run(RunCommand),

    /// Show the resolved pipeline without executing it
    Plan(PlanCommand),

    /// Validate a deploy configuration file
    Check(CheckCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

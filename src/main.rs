mod cli;
mod core;
mod execution;
mod ops;

use anyhow::{Context, Result};
use crate::cli::commands::{CheckCommand, PlanCommand, RunCommand};
use crate::cli::output::*;
use crate::cli::{Cli, Command};
use crate::core::{DeployConfig, DeployPlan};
use crate::execution::PipelineDriver;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Config file picked up when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "redeploy.yml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command; a bare invocation runs the full pipeline
    match cli.command.clone() {
        Some(Command::Run(cmd)) => run_pipeline(&cmd, &cli).await?,
        Some(Command::Plan(cmd)) => show_plan(&cmd, &cli)?,
        Some(Command::Check(cmd)) => check_config(&cmd)?,
        None => run_pipeline(&RunCommand::default(), &cli).await?,
    }

    Ok(())
}

/// Load the deploy config: explicit file, conventional file, or defaults
fn load_config(cli: &Cli) -> Result<DeployConfig> {
    match &cli.config {
        Some(path) => {
            DeployConfig::from_file(path).with_context(|| format!("Failed to load {}", path))
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            DeployConfig::from_file(DEFAULT_CONFIG_PATH)
                .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_PATH))
        }
        None => Ok(DeployConfig::default()),
    }
}

fn apply_overrides(mut config: DeployConfig, cmd: &RunCommand) -> Result<DeployConfig> {
    if let Some(working_tree) = &cmd.working_tree {
        config.working_tree = working_tree.into();
    }
    if let Some(compose_file) = &cmd.compose_file {
        config.compose_file = compose_file.into();
    }
    if let Some(service) = &cmd.service {
        config.service = service.clone();
    }
    if let Some(tail_secs) = cmd.tail_secs {
        config.tail_secs = tail_secs;
    }
    config.validate()?;
    Ok(config)
}

async fn run_pipeline(cmd: &RunCommand, cli: &Cli) -> Result<()> {
    let config = apply_overrides(load_config(cli)?, cmd)?;

    let mut plan = DeployPlan::from_config(&config);
    if cmd.no_tail {
        plan.tail = std::time::Duration::ZERO;
    }

    let mut driver = PipelineDriver::new();

    // Operator-facing progress goes to stdout as events arrive
    driver.add_event_handler(|event| {
        println!("{}", format_pipeline_event(&event));
    });

    // Ctrl-C detaches the log tail early; it is not an error
    let cancel = driver.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.notify_one();
        }
    });

    println!();
    let outcome = driver.execute(&plan).await;

    println!("\n{}", format_outcome(&plan.name, &outcome));
    for warning in &outcome.warnings {
        println!("{} {}", WARN, style(warning).dim());
    }

    if !outcome.completed() {
        std::process::exit(outcome.exit_code());
    }

    Ok(())
}

fn show_plan(cmd: &PlanCommand, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    config.validate()?;
    let plan = DeployPlan::from_config(&config);

    if cmd.json {
        let steps: Vec<_> = plan
            .steps
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "command": s.action.describe(),
                    "fatal": s.fatal,
                })
            })
            .collect();
        let data = serde_json::json!({
            "name": plan.name,
            "steps": steps,
            "log_stream": plan.logs.describe(),
            "tail_secs": plan.tail.as_secs(),
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{} {}", INFO, style(&plan.name).bold());
    for step in &plan.steps {
        let gate = if step.fatal { "fatal" } else { "best-effort" };
        println!(
            "  {} {} ({})",
            style(&step.name).cyan(),
            style(format!("[{}]", step.action.describe())).dim(),
            gate
        );
    }
    println!(
        "  then tail {} for {}s",
        style(plan.logs.describe()).dim(),
        plan.tail.as_secs()
    );

    Ok(())
}

fn check_config(cmd: &CheckCommand) -> Result<()> {
    println!("{} Validating deploy configuration...", INFO);

    match DeployConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Configuration is valid!", CHECK);
            println!("  Service: {}", style(&config.service).bold());
            println!("  Working tree: {}", style(config.working_tree.display()).cyan());
            println!("  Compose file: {}", style(config.compose_file.display()).cyan());
            println!("  Tail: {}s", style(config.tail_secs).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

//! Implementation of the `neosapiens run` command.

use super::build_backend;
use crate::backend::CommandBackend;
use crate::cli::RunArgs;
use crate::config::SwarmConfig;
use crate::context::WorkspaceContext;
use crate::error::{Result, SwarmError};
use crate::swarm::{Swarm, SwarmOutcome, run_swarm};
use std::sync::Arc;

/// Execute the `neosapiens run` command.
pub fn cmd_run(ctx: &WorkspaceContext, args: RunArgs) -> Result<()> {
    let config = ctx.load_config()?;

    if args.dry_run {
        let team_task = args.team_task.as_deref().filter(|t| !t.trim().is_empty());
        let Some(team_task) = team_task else {
            return Err(SwarmError::UserError(
                "--team-task is required for a dry run".to_string(),
            ));
        };
        println!("{}", dry_run_report(ctx, &config, team_task)?);
        return Ok(());
    }

    let backend = build_backend(ctx, &config)?;
    let outcome = run_swarm(
        backend,
        &config,
        args.team_task.as_deref(),
        args.task.as_deref(),
    )?;

    println!("{}", format_outcome(&outcome));
    Ok(())
}

/// Describe the planner call without making it.
///
/// The credential check is skipped so a dry run works before a key is set up.
fn dry_run_report(ctx: &WorkspaceContext, config: &SwarmConfig, team_task: &str) -> Result<String> {
    let mut backend_config = config.backend.clone();
    backend_config.api_key_env = None;
    let backend = CommandBackend::from_config(&backend_config, &ctx.prompts_dir)?;

    let swarm = Swarm::new(Arc::new(backend.clone()), config.clone());
    let request = swarm.planner_request(team_task)?;
    let command = backend.preview(&request)?;

    Ok(format!(
        "Backend command:\n  {}\n\nOrchestrator prompt (agent: {}, max_tokens: {}):\n\n{}",
        command, request.agent, request.max_tokens, request.prompt
    ))
}

fn format_outcome(outcome: &SwarmOutcome) -> String {
    let workers = if outcome.workers.is_empty() {
        "(none)".to_string()
    } else {
        outcome.workers.join(", ")
    };

    format!(
        "Plan: {}\nWorkers: {}\n\n{}",
        outcome.plan.plan(),
        workers,
        outcome.output
    )
}

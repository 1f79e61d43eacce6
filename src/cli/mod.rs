//! CLI argument parsing for neosapiens.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Neosapiens: plan a team of AI agents for a goal, then put them to work.
///
/// An orchestrator agent turns a free-text team task into a plan and a roster
/// of named agents. The roster becomes worker agents, and a boss agent
/// coordinates them on the task.
#[derive(Parser, Debug)]
#[command(name = "neosapiens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to the config file (default: nearest neosapiens.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as newline-delimited JSON.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available commands for neosapiens.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter neosapiens.yaml.
    ///
    /// Every setting is spelled out with its default value.
    Init(InitArgs),

    /// Extract and validate a plan from a model response.
    ///
    /// Reads the response from FILE, or from stdin when FILE is omitted,
    /// and prints the validated plan as JSON.
    Extract(ExtractArgs),

    /// Ask the orchestrator to plan a team, without running it.
    Plan(PlanArgs),

    /// Plan a team, create its agents, and run the boss on a task.
    Run(RunArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `extract` command.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// File holding the model response (default: stdin).
    pub file: Option<PathBuf>,
}

/// Arguments for the `plan` command.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Description of the team to assemble.
    pub team_task: String,

    /// Print the orchestrator's unmodified reply instead of the validated plan.
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Description of the team to assemble.
    #[arg(long)]
    pub team_task: Option<String>,

    /// Task for the assembled team.
    #[arg(long)]
    pub task: Option<String>,

    /// Show the backend command and orchestrator prompt without calling the model.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

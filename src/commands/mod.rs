//! Command implementations for neosapiens.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the backend construction every model-calling
//! command shares.

mod extract;
mod init;
mod plan;
mod run;

use crate::backend::{CommandBackend, LanguageModel};
use crate::cli::{Command, GlobalArgs};
use crate::config::SwarmConfig;
use crate::context::WorkspaceContext;
use crate::error::Result;
use std::sync::Arc;

/// Dispatch a command to its implementation.
pub fn dispatch(global: &GlobalArgs, command: Command) -> Result<()> {
    let ctx = WorkspaceContext::resolve(global.config.as_deref())?;
    tracing::debug!(
        root = %ctx.root.display(),
        config = %ctx.config_path.display(),
        "resolved workspace"
    );

    match command {
        Command::Init(args) => init::cmd_init(&ctx, args),
        Command::Extract(args) => extract::cmd_extract(args),
        Command::Plan(args) => plan::cmd_plan(&ctx, args),
        Command::Run(args) => run::cmd_run(&ctx, args),
    }
}

/// Build the configured backend. Fails early on missing credentials.
fn build_backend(ctx: &WorkspaceContext, config: &SwarmConfig) -> Result<Arc<dyn LanguageModel>> {
    let backend = CommandBackend::from_config(&config.backend, &ctx.prompts_dir)?;
    tracing::debug!(command = %config.backend.command, "backend ready");
    Ok(Arc::new(backend))
}

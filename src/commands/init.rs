//! Implementation of the `neosapiens init` command.

use crate::cli::InitArgs;
use crate::config::SwarmConfig;
use crate::context::WorkspaceContext;
use crate::error::{Result, SwarmError};
use crate::fs::atomic_write;

const CONFIG_HEADER: &str = "\
# neosapiens configuration.
#
# backend.command may reference {agent}, {max_tokens}, and {prompt_file};
# the prompt is always written to the command's stdin as well.
# prompt_templates may override: orchestrator ({team}), boss,
# select_workers ({agents_json}, {task}).

";

/// Execute the `neosapiens init` command.
pub fn cmd_init(ctx: &WorkspaceContext, args: InitArgs) -> Result<()> {
    if ctx.config_exists() && !args.force {
        return Err(SwarmError::UserError(format!(
            "config already exists at '{}'.\n\
             Re-run with --force to overwrite it.",
            ctx.config_path.display()
        )));
    }

    let content = starter_config()?;
    atomic_write(&ctx.config_path, content)?;
    tracing::info!(path = %ctx.config_path.display(), "wrote starter config");

    println!("Wrote {}", ctx.config_path.display());
    Ok(())
}

fn starter_config() -> Result<String> {
    Ok(format!("{}{}", CONFIG_HEADER, SwarmConfig::starter().to_yaml()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path(), None);

        cmd_init(&ctx, InitArgs { force: false }).unwrap();

        let content = std::fs::read_to_string(&ctx.config_path).unwrap();
        assert!(content.starts_with("# neosapiens configuration."));
        assert_eq!(ctx.load_config().unwrap(), SwarmConfig::starter());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path(), None);
        std::fs::write(&ctx.config_path, "boss:\n  max_loops: 2\n").unwrap();

        let err = cmd_init(&ctx, InitArgs { force: false }).unwrap_err();

        assert!(matches!(err, SwarmError::UserError(_)));
        assert!(err.to_string().contains("--force"));
        assert_eq!(ctx.load_config().unwrap().boss.max_loops, Some(2));
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path(), None);
        std::fs::write(&ctx.config_path, "boss:\n  max_loops: 2\n").unwrap();

        cmd_init(&ctx, InitArgs { force: true }).unwrap();

        assert_eq!(ctx.load_config().unwrap().boss.max_loops, Some(5));
    }
}

//! Workspace resolution for neosapiens.
//!
//! Commands run against a workspace: the nearest directory (searching upward
//! from the working directory) that contains `neosapiens.yaml`, or the working
//! directory itself when no config exists yet. Scratch files such as rendered
//! prompt files live under `{root}/.neosapiens/`.

use crate::config::SwarmConfig;
use crate::error::{Result, SwarmError};
use std::env;
use std::path::{Path, PathBuf};

/// Config file name looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = "neosapiens.yaml";

/// Scratch directory name within the workspace root.
pub const STATE_DIR_NAME: &str = ".neosapiens";

/// Resolved paths for a neosapiens invocation. All paths are absolute.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Directory holding the config (or the working directory).
    pub root: PathBuf,

    /// Config file path (default: `{root}/neosapiens.yaml`).
    pub config_path: PathBuf,

    /// Where prompt files for `{prompt_file}` backends are written.
    pub prompts_dir: PathBuf,
}

impl WorkspaceContext {
    /// Resolve the workspace from the current working directory.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            SwarmError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(&cwd, config_override))
    }

    /// Resolve the workspace from a specific directory.
    ///
    /// An explicit config path wins over the upward search; its parent
    /// directory becomes the root. Relative paths are taken from `cwd`.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P, config_override: Option<&Path>) -> Self {
        let cwd = cwd.as_ref();

        let (root, config_path) = match config_override {
            Some(path) => {
                let config_path = cwd.join(path);
                let root = config_path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.to_path_buf());
                (root, config_path)
            }
            None => {
                let root = cwd
                    .ancestors()
                    .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
                    .unwrap_or(cwd)
                    .to_path_buf();
                let config_path = root.join(CONFIG_FILE_NAME);
                (root, config_path)
            }
        };

        let prompts_dir = root.join(STATE_DIR_NAME).join("prompts");

        Self {
            root,
            config_path,
            prompts_dir,
        }
    }

    /// Whether the config file exists.
    pub fn config_exists(&self) -> bool {
        self.config_path.is_file()
    }

    /// Load the workspace config, falling back to defaults when it is missing.
    pub fn load_config(&self) -> Result<SwarmConfig> {
        SwarmConfig::load_or_default(&self.config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_without_config_uses_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path(), None);

        assert_eq!(ctx.root, temp_dir.path());
        assert_eq!(ctx.config_path, temp_dir.path().join("neosapiens.yaml"));
        assert!(ctx.prompts_dir.ends_with(".neosapiens/prompts"));
        assert!(!ctx.config_exists());
    }

    #[test]
    fn test_resolve_finds_config_in_ancestor() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("neosapiens.yaml"), "").unwrap();
        let subdir = temp_dir.path().join("src").join("nested");
        std::fs::create_dir_all(&subdir).unwrap();

        let ctx = WorkspaceContext::resolve_from(&subdir, None);

        assert_eq!(ctx.root, temp_dir.path());
        assert!(ctx.config_exists());
        assert_eq!(ctx.prompts_dir, temp_dir.path().join(".neosapiens").join("prompts"));
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("neosapiens.yaml"), "").unwrap();

        let ctx =
            WorkspaceContext::resolve_from(temp_dir.path(), Some(Path::new("conf/team.yaml")));

        assert_eq!(ctx.config_path, temp_dir.path().join("conf/team.yaml"));
        assert_eq!(ctx.root, temp_dir.path().join("conf"));
        assert!(!ctx.config_exists());
    }

    #[test]
    fn test_load_config_defaults_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path(), None);
        assert_eq!(ctx.load_config().unwrap(), SwarmConfig::default());

        std::fs::write(&ctx.config_path, "boss:\n  max_loops: 2\n").unwrap();
        assert_eq!(ctx.load_config().unwrap().boss.max_loops, Some(2));
    }
}

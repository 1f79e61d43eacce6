//! Subprocess-backed language model.
//!
//! Executes a model CLI per completion with timeout, output capture, and
//! environment merging. The prompt is always written to the child's stdin;
//! commands that prefer a file can reference `{prompt_file}` instead. Prompt
//! files are removed once the command exits.

use super::{BackendError, CompletionRequest, LanguageModel};
use crate::agent::prompt::{TemplateError, render_template, template_variables};
use crate::config::BackendConfig;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Variables available to backend command templates.
const COMMAND_VARIABLES: &[&str] = &["agent", "prompt_file", "max_tokens"];

/// Language model backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    /// Command template, split into arguments before rendering.
    args: Vec<String>,
    timeout_seconds: u64,
    environment: HashMap<String, String>,
    /// Directory for `{prompt_file}` prompts.
    prompts_dir: PathBuf,
    writes_prompt_file: bool,
}

impl CommandBackend {
    /// Build a backend from config.
    ///
    /// # Errors
    ///
    /// * [`BackendError::MissingCredentials`] - `api_key_env` names an unset variable
    /// * [`BackendError::InvalidCommand`] - the command template is empty,
    ///   unparseable, or references an unknown variable
    pub fn from_config(
        config: &BackendConfig,
        prompts_dir: impl Into<PathBuf>,
    ) -> Result<Self, BackendError> {
        let mut environment = config.environment.clone();

        if let Some(var) = config.api_key_env.as_deref().filter(|v| !v.is_empty()) {
            let value = std::env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BackendError::MissingCredentials {
                    var: var.to_string(),
                })?;
            environment.insert(var.to_string(), value);
        }

        let args = shell_words::split(&config.command).map_err(|e| {
            BackendError::InvalidCommand(format!(
                "failed to parse '{}': {}. Check for unmatched quotes or invalid escape sequences.",
                config.command, e
            ))
        })?;
        if args.is_empty() {
            return Err(BackendError::InvalidCommand(
                "command is empty after parsing".to_string(),
            ));
        }

        let mut writes_prompt_file = false;
        for arg in &args {
            let names = template_variables(arg).map_err(|e| command_template_error(arg, e))?;
            for name in names {
                if !COMMAND_VARIABLES.contains(&name.as_str()) {
                    return Err(BackendError::InvalidCommand(format!(
                        "command references undefined variable '{}'. Available variables: {}",
                        name,
                        COMMAND_VARIABLES.join(", ")
                    )));
                }
                writes_prompt_file |= name == "prompt_file";
            }
        }

        Ok(Self {
            args,
            timeout_seconds: config.timeout_seconds,
            environment,
            prompts_dir: prompts_dir.into(),
            writes_prompt_file,
        })
    }

    /// Render the command line for a request, as it would be executed.
    pub fn render_command(
        &self,
        request: &CompletionRequest,
        prompt_file: &Path,
    ) -> Result<Vec<String>, BackendError> {
        let mut vars = HashMap::new();
        vars.insert("agent".to_string(), request.agent.clone());
        vars.insert("max_tokens".to_string(), request.max_tokens.to_string());
        vars.insert(
            "prompt_file".to_string(),
            prompt_file.to_string_lossy().to_string(),
        );

        self.args
            .iter()
            .map(|arg| render_template(arg, &vars).map_err(|e| command_template_error(arg, e)))
            .collect()
    }

    /// Shell-quoted command line for `request`, without running it.
    pub fn preview(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let args = self.render_command(request, &self.prompt_file_path(request))?;
        Ok(shell_words::join(args))
    }

    /// Representative `{prompt_file}` path for `request`, used by [`Self::preview`].
    fn prompt_file_path(&self, request: &CompletionRequest) -> PathBuf {
        self.prompts_dir.join(format!(
            "{}-{}.md",
            agent_slug(&request.agent),
            uuid::Uuid::new_v4().simple()
        ))
    }

    /// Write the prompt to a temp file that is removed when dropped.
    ///
    /// The file goes to `prompts_dir` only when the command references
    /// `{prompt_file}`; otherwise it lives in the system temp dir and only
    /// feeds stdin.
    fn write_prompt_file(&self, request: &CompletionRequest) -> Result<NamedTempFile, BackendError> {
        let prefix = format!("{}-", agent_slug(&request.agent));
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".md");

        let created = if self.writes_prompt_file {
            fs::create_dir_all(&self.prompts_dir)
                .and_then(|()| builder.tempfile_in(&self.prompts_dir))
        } else {
            builder.tempfile()
        };
        let mut file = created.map_err(|e| io_error(&self.prompts_dir, e))?;

        file.write_all(request.prompt.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| io_error(file.path(), e))?;
        Ok(file)
    }
}

impl LanguageModel for CommandBackend {
    fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        // Stdin, stdout, and stderr are all backed by files. A grandchild that
        // outlives a killed child can keep these handles open without
        // blocking us.
        let prompt_file = self.write_prompt_file(request)?;
        let args = self.render_command(request, prompt_file.path())?;
        let program = &args[0];

        let stdin = prompt_file
            .reopen()
            .map_err(|e| io_error(prompt_file.path(), e))?;
        let mut stdout = capture_file()?;
        let mut stderr = capture_file()?;

        let mut command = Command::new(program);
        command
            .args(&args[1..])
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(clone_handle(&stdout)?))
            .stderr(Stdio::from(clone_handle(&stderr)?));

        for (key, value) in &self.environment {
            command.env(key, value);
        }

        tracing::debug!(agent = %request.agent, program = %program, "dispatching completion");

        let start_time = Instant::now();
        let mut child = command.spawn().map_err(|e| BackendError::Spawn {
            program: program.clone(),
            source: e,
        })?;

        let timeout = Duration::from_secs(self.timeout_seconds);
        let (exit_code, timed_out) = wait_with_timeout(&mut child, timeout)?;

        tracing::info!(
            agent = %request.agent,
            duration_ms = start_time.elapsed().as_millis() as u64,
            exit_code = ?exit_code,
            timed_out,
            "completion finished"
        );

        if timed_out {
            return Err(BackendError::TimedOut {
                seconds: self.timeout_seconds,
            });
        }
        if exit_code != Some(0) {
            return Err(BackendError::Failed {
                code: exit_code,
                stderr: read_capture(&mut stderr)?.trim().to_string(),
            });
        }

        Ok(read_capture(&mut stdout)?.trim().to_string())
    }
}

fn agent_slug(agent: &str) -> String {
    agent
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

fn io_error(path: &Path, err: io::Error) -> BackendError {
    BackendError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Anonymous file receiving one of the child's output streams.
fn capture_file() -> Result<File, BackendError> {
    tempfile::tempfile().map_err(|e| io_error(&std::env::temp_dir(), e))
}

fn clone_handle(file: &File) -> Result<File, BackendError> {
    file.try_clone()
        .map_err(|e| io_error(Path::new("<capture file>"), e))
}

fn read_capture(file: &mut File) -> Result<String, BackendError> {
    let mut buf = Vec::new();
    file.seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_end(&mut buf))
        .map_err(|e| io_error(Path::new("<capture file>"), e))?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn command_template_error(arg: &str, err: TemplateError) -> BackendError {
    match err {
        TemplateError::UndefinedVariable { name, .. } => BackendError::InvalidCommand(format!(
            "command argument '{}' references undefined variable '{}'",
            arg, name
        )),
        TemplateError::UnmatchedBrace { position } => BackendError::InvalidCommand(format!(
            "command argument '{}' has unmatched '{{' at position {}",
            arg, position
        )),
        TemplateError::EmptyVariableName { position } => BackendError::InvalidCommand(format!(
            "command argument '{}' has empty variable name at position {}",
            arg, position
        )),
    }
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool), BackendError> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    // SIGKILL on Unix, TerminateProcess on Windows.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok((None, true));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                return Err(BackendError::Io {
                    path: PathBuf::from("<child process>"),
                    message: format!("failed to check process status: {}", e),
                });
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(command: &str) -> BackendConfig {
        BackendConfig {
            command: command.to_string(),
            timeout_seconds: 10,
            api_key_env: None,
            ..Default::default()
        }
    }

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            agent: "Swarm Orchestrator".to_string(),
            prompt: prompt.to_string(),
            max_tokens: 4000,
        }
    }

    #[test]
    fn test_prompt_is_written_to_stdin() {
        let temp_dir = TempDir::new().unwrap();
        let backend = CommandBackend::from_config(&config("cat"), temp_dir.path()).unwrap();

        let out = backend.complete(&request("hello from stdin\n")).unwrap();
        assert_eq!(out, "hello from stdin");
    }

    #[test]
    fn test_variables_are_substituted_per_argument() {
        let temp_dir = TempDir::new().unwrap();
        let backend =
            CommandBackend::from_config(&config("echo {agent} {max_tokens}"), temp_dir.path())
                .unwrap();

        let out = backend.complete(&request("ignored")).unwrap();
        assert_eq!(out, "Swarm Orchestrator 4000");
    }

    #[test]
    fn test_prompt_file_is_removed_after_completion() {
        let temp_dir = TempDir::new().unwrap();
        let prompts_dir = temp_dir.path().join("prompts");
        let backend =
            CommandBackend::from_config(&config("cat {prompt_file}"), &prompts_dir).unwrap();

        let out = backend.complete(&request("prompt via file")).unwrap();
        assert_eq!(out, "prompt via file");

        assert_eq!(std::fs::read_dir(&prompts_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_prompt_file_is_named_after_agent() {
        let temp_dir = TempDir::new().unwrap();
        let backend = CommandBackend::from_config(
            &config("sh -c \"basename {prompt_file}\""),
            temp_dir.path().join("prompts"),
        )
        .unwrap();

        let out = backend.complete(&request("x")).unwrap();
        assert!(out.starts_with("swarm-orchestrator-"), "got {}", out);
        assert!(out.ends_with(".md"));
    }

    #[test]
    fn test_prompt_file_is_removed_when_command_fails() {
        let temp_dir = TempDir::new().unwrap();
        let prompts_dir = temp_dir.path().join("prompts");
        let backend = CommandBackend::from_config(
            &config("sh -c \"cat {prompt_file} >/dev/null; exit 1\""),
            &prompts_dir,
        )
        .unwrap();

        let err = backend.complete(&request("x")).unwrap_err();
        assert!(matches!(err, BackendError::Failed { code: Some(1), .. }));
        assert_eq!(std::fs::read_dir(&prompts_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_prompt_file_not_written_when_unreferenced() {
        let temp_dir = TempDir::new().unwrap();
        let prompts_dir = temp_dir.path().join("prompts");
        let backend = CommandBackend::from_config(&config("cat"), &prompts_dir).unwrap();

        backend.complete(&request("x")).unwrap();
        assert!(!prompts_dir.exists());
    }

    #[test]
    fn test_nonzero_exit_reports_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let backend = CommandBackend::from_config(
            &config("sh -c \"echo rate limited >&2; exit 3\""),
            temp_dir.path(),
        )
        .unwrap();

        let err = backend.complete(&request("x")).unwrap_err();
        match err {
            BackendError::Failed { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "rate limited");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout_kills_process() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = config("sleep 10");
        cfg.timeout_seconds = 1;
        let backend = CommandBackend::from_config(&cfg, temp_dir.path()).unwrap();

        let start = Instant::now();
        let err = backend.complete(&request("x")).unwrap_err();
        assert!(matches!(err, BackendError::TimedOut { seconds: 1 }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_is_not_held_up_by_grandchildren() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = config("sh -c \"sleep 8; echo late\"");
        cfg.timeout_seconds = 1;
        let backend = CommandBackend::from_config(&cfg, temp_dir.path()).unwrap();

        let start = Instant::now();
        let err = backend.complete(&request("x")).unwrap_err();
        assert!(matches!(err, BackendError::TimedOut { seconds: 1 }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_nonexistent_command_fails_to_spawn() {
        let temp_dir = TempDir::new().unwrap();
        let backend =
            CommandBackend::from_config(&config("nonexistent_command_xyz_123"), temp_dir.path())
                .unwrap();

        let err = backend.complete(&request("x")).unwrap_err();
        assert!(err.to_string().contains("failed to execute"));
    }

    #[test]
    fn test_environment_is_merged() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = config("sh -c \"echo $MODEL_NAME\"");
        cfg.environment
            .insert("MODEL_NAME".to_string(), "claude-test".to_string());
        let backend = CommandBackend::from_config(&cfg, temp_dir.path()).unwrap();

        assert_eq!(backend.complete(&request("x")).unwrap(), "claude-test");
    }

    #[test]
    fn test_missing_credentials_fail_at_construction() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = config("cat");
        cfg.api_key_env = Some("NEOSAPIENS_TEST_API_KEY".to_string());

        temp_env::with_var_unset("NEOSAPIENS_TEST_API_KEY", || {
            let err = CommandBackend::from_config(&cfg, temp_dir.path()).unwrap_err();
            assert!(matches!(
                err,
                BackendError::MissingCredentials { ref var } if var == "NEOSAPIENS_TEST_API_KEY"
            ));
        });

        temp_env::with_var("NEOSAPIENS_TEST_API_KEY", Some("   "), || {
            assert!(CommandBackend::from_config(&cfg, temp_dir.path()).is_err());
        });
    }

    #[test]
    fn test_credentials_are_passed_to_child() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = config("sh -c \"echo $NEOSAPIENS_TEST_API_KEY_2\"");
        cfg.api_key_env = Some("NEOSAPIENS_TEST_API_KEY_2".to_string());

        temp_env::with_var("NEOSAPIENS_TEST_API_KEY_2", Some("sk-test"), || {
            let backend = CommandBackend::from_config(&cfg, temp_dir.path()).unwrap();
            assert_eq!(backend.complete(&request("x")).unwrap(), "sk-test");
        });
    }

    #[test]
    fn test_invalid_commands_fail_at_construction() {
        let temp_dir = TempDir::new().unwrap();

        let err = CommandBackend::from_config(&config("echo \"unmatched"), temp_dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let err = CommandBackend::from_config(&config("   "), temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("empty"));

        let err =
            CommandBackend::from_config(&config("echo {model}"), temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("undefined variable 'model'"));

        let err = CommandBackend::from_config(&config("echo {agent"), temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("unmatched"));
    }

    #[test]
    fn test_render_command_keeps_spaces_inside_arguments() {
        let temp_dir = TempDir::new().unwrap();
        let backend = CommandBackend::from_config(
            &config("model --name {agent} --prompt {prompt_file}"),
            temp_dir.path(),
        )
        .unwrap();

        let args = backend
            .render_command(&request("x"), Path::new("/tmp/my prompts/p.md"))
            .unwrap();
        assert_eq!(
            args,
            vec![
                "model",
                "--name",
                "Swarm Orchestrator",
                "--prompt",
                "/tmp/my prompts/p.md"
            ]
        );
    }

    #[test]
    fn test_preview_quotes_arguments_and_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let prompts_dir = temp_dir.path().join("prompts");
        let backend = CommandBackend::from_config(
            &config("llm --agent {agent} --max {max_tokens} {prompt_file}"),
            &prompts_dir,
        )
        .unwrap();

        let preview = backend.preview(&request("hello")).unwrap();

        assert!(preview.starts_with("llm --agent 'Swarm Orchestrator' --max 4000 "));
        assert!(preview.contains("swarm-orchestrator-"));
        assert!(!prompts_dir.exists());
    }
}

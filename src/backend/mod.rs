//! Language-model backend capability.
//!
//! Agents never talk to a model directly. They hold an
//! `Arc<dyn LanguageModel>` injected at construction time, so the absence of
//! a usable backend is a configuration error raised once (when the backend is
//! built), not a null-check scattered through agent code.
//!
//! The shipped implementation, [`CommandBackend`], dispatches each completion
//! to a CLI model client as a subprocess (`claude -p`, `llm`, a wrapper
//! script, ...). Tests use a scripted in-memory model instead.

mod command;

pub use command::CommandBackend;

use std::path::PathBuf;
use thiserror::Error;

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Name of the agent issuing the request (for logs and command templates).
    pub agent: String,
    /// Fully rendered prompt.
    pub prompt: String,
    /// Upper bound on generated tokens, passed through to the backend.
    pub max_tokens: u32,
}

/// A language model that turns a prompt into generated text.
///
/// Errors are returned untouched to the caller; implementations must not
/// retry on their own.
pub trait LanguageModel: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}

/// Errors raised while building or invoking a backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The configured credential variable is unset or empty.
    #[error(
        "missing credentials: environment variable '{var}' is not set.\n\
         Fix: export {var} or add it to a .env file in the working directory."
    )]
    MissingCredentials { var: String },

    /// The command template could not be rendered or split into arguments.
    #[error("invalid backend command: {0}")]
    InvalidCommand(String),

    /// The backend process could not be started.
    #[error("failed to execute backend command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend process exceeded its timeout and was killed.
    #[error("backend timed out after {seconds}s")]
    TimedOut { seconds: u64 },

    /// The backend process exited unsuccessfully.
    #[error("backend exited with code {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    /// Filesystem or pipe failure around the backend process.
    #[error("backend I/O failed at '{path}': {message}")]
    Io { path: PathBuf, message: String },
}

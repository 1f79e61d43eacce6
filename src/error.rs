//! Error types for the neosapiens CLI.
//!
//! Uses thiserror for derive macros. Each subsystem owns its error enum
//! (`ExtractionError`, `BackendError`, `AgentError`); `SwarmError` wraps them
//! so commands can propagate with `?` and still report a precise exit code.

use crate::agent::AgentError;
use crate::backend::BackendError;
use crate::exit_codes;
use crate::plan::ExtractionError;
use thiserror::Error;

/// Main error type for neosapiens operations.
#[derive(Error, Debug)]
pub enum SwarmError {
    /// User provided invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// Configuration file could not be read, parsed, or validated.
    #[error("config error: {0}")]
    Config(String),

    /// The orchestrator response did not yield a usable plan.
    #[error("failed to obtain a plan: {0}")]
    Plan(#[from] ExtractionError),

    /// An agent could not be constructed or run.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The language model backend failed.
    #[error("language model backend failed: {0}")]
    Backend(#[from] BackendError),

    /// No agent with this name is registered in the network.
    #[error("agent '{0}' not found in network")]
    UnknownAgent(String),
}

impl SwarmError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SwarmError::UserError(_) => exit_codes::USER_ERROR,
            SwarmError::Config(_) => exit_codes::USER_ERROR,
            SwarmError::Plan(_) => exit_codes::PLAN_FAILURE,
            SwarmError::Agent(AgentError::Backend(_)) => exit_codes::BACKEND_FAILURE,
            SwarmError::Agent(_) => exit_codes::AGENT_FAILURE,
            SwarmError::UnknownAgent(_) => exit_codes::AGENT_FAILURE,
            SwarmError::Backend(_) => exit_codes::BACKEND_FAILURE,
        }
    }
}

/// Result type alias for neosapiens operations.
pub type Result<T> = std::result::Result<T, SwarmError>;

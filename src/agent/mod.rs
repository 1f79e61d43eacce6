//! Agent runtime.
//!
//! This module provides the runnable side of the swarm:
//!
//! - **Runtime**: `Agent` handles built from a name, system prompt, rules,
//!   tools, and an injected language model
//! - **Factory**: turns plan descriptors into worker agents
//! - **Prompt**: template engine and built-in prompts
//! - **Tools**: capabilities declared to agents
//!
//! Agents are synchronous: `run` renders one prompt per loop and blocks on
//! the backend. Coordination between agents is left to the boss agent's model.

mod factory;
pub mod prompt;
mod runtime;
mod tools;

use crate::backend::BackendError;
use thiserror::Error;

// Re-export public API
pub use factory::AgentFactory;
pub use runtime::{Agent, AgentId};
pub use tools::ToolKind;

/// Errors raised while constructing or running an agent.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The agent spec cannot produce a working agent.
    #[error("cannot create agent '{name}': {reason}")]
    InvalidSpec { name: String, reason: String },

    /// The backend failed during a run.
    #[error("agent run failed: {0}")]
    Backend(#[from] BackendError),
}

//! Configuration model for neosapiens.
//!
//! This module defines the `SwarmConfig` struct that represents
//! `neosapiens.yaml`. It supports forward-compatible YAML parsing (unknown
//! fields are preserved), role-specific defaults for optional fields, and
//! validation of config values.
//!
//! # File Format
//!
//! ```yaml
//! backend:
//!   command: "claude -p"
//!   timeout_seconds: 600
//!   api_key_env: ANTHROPIC_API_KEY
//!   max_tokens: 4000
//!
//! planner:
//!   name: Swarm Orchestrator
//!   max_loops: 1
//!
//! boss:
//!   max_loops: 5
//!   stopping_token: "<DONE>"
//!
//! workers:
//!   tools: [browser, terminal, create_file, file_editor]
//!
//! prompt_templates:
//!   select_workers: |
//!     Agents: {agents_json}
//!     Task: {task}
//! ```

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::SwarmConfig;
pub use types::{AgentRole, BackendConfig, ResolvedAgentSettings};

//! Configuration types and defaults for neosapiens.
//!
//! This module defines the backend and per-role agent settings used by
//! `SwarmConfig`, plus the default value functions serde needs.

use crate::agent::ToolKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default timeout for one backend completion in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 600;

/// Default token budget passed to the backend.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Default token that marks an agent reply as finished.
pub const DEFAULT_STOPPING_TOKEN: &str = "<DONE>";

/// Name shared by the planner and boss agents.
pub const ORCHESTRATOR_NAME: &str = "Swarm Orchestrator";

fn default_backend_command() -> String {
    "claude -p".to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_api_key_env() -> Option<String> {
    Some("ANTHROPIC_API_KEY".to_string())
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// How to reach the language model.
///
/// The command is a template; each argument may reference `{agent}`,
/// `{max_tokens}`, and `{prompt_file}`. The rendered prompt is always written
/// to the process's stdin as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Command template, e.g. `claude -p` or `llm -m claude-3.5-sonnet`.
    #[serde(default = "default_backend_command")]
    pub command: String,

    /// Timeout for a single completion.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Environment variable that must hold the API key. `null` disables the check.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,

    /// Token budget for each completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Extra environment variables for the backend process.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environment: HashMap<String, String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            command: default_backend_command(),
            timeout_seconds: default_timeout_seconds(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            environment: HashMap::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Which part an agent plays in the swarm. Determines setting defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRole {
    /// Turns the team task into a plan and agent roster.
    Planner,
    /// Receives the roster and the task, and coordinates the workers.
    Boss,
    /// One agent per descriptor in the plan.
    Worker,
}

impl AgentRole {
    /// Config key of this role's settings section.
    pub fn key(self) -> &'static str {
        match self {
            AgentRole::Planner => "planner",
            AgentRole::Boss => "boss",
            AgentRole::Worker => "workers",
        }
    }

    fn default_max_loops(self) -> u32 {
        match self {
            AgentRole::Planner | AgentRole::Worker => 1,
            AgentRole::Boss => 5,
        }
    }

    fn default_tools(self) -> Vec<ToolKind> {
        match self {
            AgentRole::Worker => ToolKind::ALL.to_vec(),
            AgentRole::Planner | AgentRole::Boss => Vec::new(),
        }
    }
}

/// Per-role agent settings. Every field is optional; unset fields take the
/// role's defaults when resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Agent name (planner and boss only; workers are named by the plan).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Maximum model calls per run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_loops: Option<u32>,

    /// Token that ends a run early when it appears in a reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopping_token: Option<String>,

    /// Tools declared to the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolKind>>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Agent settings with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAgentSettings {
    pub name: String,
    pub max_loops: u32,
    pub stopping_token: String,
    pub tools: Vec<ToolKind>,
}

impl AgentSettings {
    /// Apply the defaults for `role`.
    pub fn resolve(&self, role: AgentRole) -> ResolvedAgentSettings {
        ResolvedAgentSettings {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| ORCHESTRATOR_NAME.to_string()),
            max_loops: self.max_loops.unwrap_or_else(|| role.default_max_loops()),
            stopping_token: self
                .stopping_token
                .clone()
                .unwrap_or_else(|| DEFAULT_STOPPING_TOKEN.to_string()),
            tools: self.tools.clone().unwrap_or_else(|| role.default_tools()),
        }
    }

    /// Settings with every default for `role` written out explicitly.
    pub fn explicit(role: AgentRole) -> Self {
        let resolved = Self::default().resolve(role);
        Self {
            name: (role != AgentRole::Worker).then_some(resolved.name),
            max_loops: Some(resolved.max_loops),
            stopping_token: Some(resolved.stopping_token),
            tools: Some(resolved.tools),
            extra: BTreeMap::new(),
        }
    }
}

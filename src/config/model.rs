//! SwarmConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a swarm run.
///
/// This struct represents the contents of `neosapiens.yaml`. Every section is
/// optional; unknown fields are preserved for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Language model backend.
    pub backend: BackendConfig,

    /// Settings for the agent that drafts the plan and roster.
    pub planner: AgentSettings,

    /// Settings for the agent that receives the roster and the task.
    pub boss: AgentSettings,

    /// Settings applied to every worker created from the plan.
    pub workers: AgentSettings,

    /// Prompt template overrides keyed by prompt name
    /// (`orchestrator`, `boss`, `select_workers`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub prompt_templates: BTreeMap<String, String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl SwarmConfig {
    /// Defaults with every role setting spelled out, as written by `init`.
    pub fn starter() -> Self {
        Self {
            backend: BackendConfig::default(),
            planner: AgentSettings::explicit(AgentRole::Planner),
            boss: AgentSettings::explicit(AgentRole::Boss),
            workers: AgentSettings::explicit(AgentRole::Worker),
            prompt_templates: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Settings section for `role`.
    pub fn settings(&self, role: AgentRole) -> &AgentSettings {
        match role {
            AgentRole::Planner => &self.planner,
            AgentRole::Boss => &self.boss,
            AgentRole::Worker => &self.workers,
        }
    }
}

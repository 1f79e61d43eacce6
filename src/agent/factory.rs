//! Agent construction from config and plan descriptors.

use super::AgentError;
use super::runtime::{Agent, AgentSpec};
use crate::backend::LanguageModel;
use crate::config::{AgentRole, SwarmConfig};
use crate::plan::AgentDescriptor;
use std::sync::Arc;

/// Builds agents for each role with the role's resolved settings.
pub struct AgentFactory {
    backend: Arc<dyn LanguageModel>,
    config: SwarmConfig,
}

impl AgentFactory {
    pub fn new(backend: Arc<dyn LanguageModel>, config: &SwarmConfig) -> Self {
        Self {
            backend,
            config: config.clone(),
        }
    }

    /// Create an agent from an explicit spec using `role`'s settings.
    pub fn create(&self, role: AgentRole, spec: AgentSpec) -> Result<Agent, AgentError> {
        let settings = self.config.settings(role).resolve(role);
        tracing::info!(
            role = role.key(),
            name = %spec.name,
            max_loops = settings.max_loops,
            tools = settings.tools.len(),
            "creating agent"
        );
        Agent::new(
            spec,
            &settings,
            self.config.backend.max_tokens,
            Arc::clone(&self.backend),
        )
    }

    /// Create the planner or boss agent. Its name comes from config.
    pub fn create_orchestrator(
        &self,
        role: AgentRole,
        system_prompt: impl Into<String>,
    ) -> Result<Agent, AgentError> {
        let name = self.config.settings(role).resolve(role).name;
        self.create(role, AgentSpec::new(name, system_prompt))
    }

    /// Create one worker per descriptor, in order.
    ///
    /// Fails on the first descriptor that cannot produce an agent; no partial
    /// list is returned.
    pub fn create_worker_agents(
        &self,
        descriptors: &[AgentDescriptor],
    ) -> Result<Vec<Agent>, AgentError> {
        descriptors
            .iter()
            .map(|descriptor| self.create(AgentRole::Worker, AgentSpec::from(descriptor)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ToolKind;
    use crate::test_support::ScriptedModel;

    #[test]
    fn test_workers_are_created_in_plan_order() {
        let factory = AgentFactory::new(
            ScriptedModel::new(Vec::<&str>::new()),
            &SwarmConfig::default(),
        );
        let descriptors = vec![
            AgentDescriptor::new("Triage", "Sort tickets.", "Be fast."),
            AgentDescriptor::new("Responder", "Answer tickets.", "Be kind."),
        ];

        let agents = factory.create_worker_agents(&descriptors).unwrap();

        let names: Vec<&str> = agents.iter().map(Agent::name).collect();
        assert_eq!(names, vec!["Triage", "Responder"]);
        assert!(agents[1].render_prompt().contains("## Rules\nBe kind."));
        assert_eq!(agents[0].tools(), ToolKind::ALL.as_slice());
        assert_ne!(agents[0].id(), agents[1].id());
    }

    #[test]
    fn test_invalid_descriptor_fails_whole_batch() {
        let factory = AgentFactory::new(
            ScriptedModel::new(Vec::<&str>::new()),
            &SwarmConfig::default(),
        );
        let descriptors = vec![
            AgentDescriptor::new("Triage", "Sort tickets.", ""),
            AgentDescriptor::new("", "Answer tickets.", ""),
        ];

        let err = factory.create_worker_agents(&descriptors).unwrap_err();
        assert!(matches!(err, AgentError::InvalidSpec { .. }));
    }

    #[test]
    fn test_orchestrator_uses_configured_name_and_no_tools() {
        let mut config = SwarmConfig::default();
        config.boss.name = Some("Lead".to_string());
        let factory = AgentFactory::new(ScriptedModel::new(Vec::<&str>::new()), &config);

        let boss = factory.create_orchestrator(AgentRole::Boss, "You lead.").unwrap();
        assert_eq!(boss.name(), "Lead");
        assert!(boss.tools().is_empty());

        let planner = factory
            .create_orchestrator(AgentRole::Planner, "You plan.")
            .unwrap();
        assert_eq!(planner.name(), "Swarm Orchestrator");
    }
}

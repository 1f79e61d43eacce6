//! In-process pool of named agents.
//!
//! Agents are kept in insertion order. Names are expected to be unique; when
//! they are not, lookups by name resolve to the first agent registered.

use crate::agent::{Agent, AgentId};
use crate::error::{Result, SwarmError};

#[derive(Debug, Default)]
pub struct AgentNetwork {
    agents: Vec<Agent>,
}

impl AgentNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent and return its id.
    pub fn add_agent(&mut self, agent: Agent) -> AgentId {
        let id = agent.id();
        tracing::debug!(agent = agent.name(), %id, tools = ?agent.tools(), "adding agent to network");
        self.agents.push(agent);
        id
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Names of all registered agents, in insertion order.
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(Agent::name).collect()
    }

    pub fn find_agent_id_by_name(&self, name: &str) -> Option<AgentId> {
        self.agents
            .iter()
            .find(|agent| agent.name() == name)
            .map(Agent::id)
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id() == id)
    }

    /// Run the agent with `id` on `task`.
    pub fn run_single_agent(&mut self, id: AgentId, task: &str) -> Result<String> {
        let agent = self
            .agents
            .iter_mut()
            .find(|agent| agent.id() == id)
            .ok_or_else(|| SwarmError::UnknownAgent(id.to_string()))?;

        tracing::info!(agent = agent.name(), "running agent");
        Ok(agent.run(task)?)
    }

    /// Look up an agent by name and run it on `task`.
    pub fn send_task(&mut self, name: &str, task: &str) -> Result<String> {
        let id = self
            .find_agent_id_by_name(name)
            .ok_or_else(|| SwarmError::UnknownAgent(name.to_string()))?;
        self.run_single_agent(id, task)
    }
}

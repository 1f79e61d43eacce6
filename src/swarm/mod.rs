//! Swarm builder.
//!
//! A swarm run has three phases:
//!
//! 1. **Plan**: the planner agent receives the orchestrator prompt rendered
//!    for the team task and replies with a plan and an agent roster, which
//!    `extract_plan` validates.
//! 2. **Staff**: one worker agent is created per roster entry and registered
//!    in the [`AgentNetwork`].
//! 3. **Execute**: the boss agent is seeded with the planner's raw roster and
//!    the task, then run on the task. A boss reply holding a delegation
//!    directive runs the named worker, and the worker's reply becomes the
//!    boss's next message. The boss's final reply is the swarm's output.
//!
//! A plan that fails extraction stops the run before any worker is created.

mod delegation;


use crate::agent::prompt::{PromptKind, render_prompt};
use crate::agent::AgentFactory;
use crate::backend::{CompletionRequest, LanguageModel};
use crate::config::{AgentRole, SwarmConfig};
use crate::error::{Result, SwarmError};
use crate::network::AgentNetwork;
use crate::plan::{PlanResult, extract_plan};
use std::sync::Arc;

/// A validated plan together with the planner reply it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTeam {
    pub plan: PlanResult,
    /// Unmodified planner reply; handed to the boss as the roster.
    pub raw: String,
}

/// Result of a full swarm run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwarmOutcome {
    pub plan: PlanResult,
    /// Names of the workers registered in the network, in plan order.
    pub workers: Vec<String>,
    /// Final reply of the boss agent.
    pub output: String,
}

pub struct Swarm {
    config: SwarmConfig,
    factory: AgentFactory,
    network: AgentNetwork,
}

impl Swarm {
    pub fn new(backend: Arc<dyn LanguageModel>, config: SwarmConfig) -> Self {
        let factory = AgentFactory::new(backend, &config);
        Self {
            config,
            factory,
            network: AgentNetwork::new(),
        }
    }

    pub fn network(&self) -> &AgentNetwork {
        &self.network
    }

    /// Render a built-in or overridden prompt.
    pub fn render(&self, kind: PromptKind, values: &[(&str, &str)]) -> Result<String> {
        render_prompt(kind, &self.config.prompt_templates, values).map_err(|e| {
            SwarmError::Config(format!("prompt template '{}': {}", kind.key(), e))
        })
    }

    /// System prompt of the planner for `team_task`.
    pub fn orchestrator_prompt(&self, team_task: &str) -> Result<String> {
        self.render(PromptKind::Orchestrator, &[("team", team_task)])
    }

    /// The first request the planner would send for `team_task`.
    pub fn planner_request(&self, team_task: &str) -> Result<CompletionRequest> {
        let system_prompt = self.orchestrator_prompt(team_task)?;
        let mut planner = self
            .factory
            .create_orchestrator(AgentRole::Planner, system_prompt)?;
        planner.add_message_to_memory(team_task);

        Ok(CompletionRequest {
            agent: planner.name().to_string(),
            prompt: planner.render_prompt(),
            max_tokens: self.config.backend.max_tokens,
        })
    }

    /// Run the planner on `team_task` and return its raw reply.
    pub fn create_agents_by_boss(&self, team_task: &str) -> Result<String> {
        let system_prompt = self.orchestrator_prompt(team_task)?;
        let mut planner = self
            .factory
            .create_orchestrator(AgentRole::Planner, system_prompt)?;

        tracing::info!(agent = planner.name(), "requesting plan");
        Ok(planner.run(team_task)?)
    }

    /// Ask the planner for a plan and validate it.
    pub fn plan(&self, team_task: &str) -> Result<PlannedTeam> {
        let raw = self.create_agents_by_boss(team_task)?;
        let plan = extract_plan(raw.as_str()).map_err(|e| {
            tracing::warn!(error = %e, "planner reply did not contain a valid plan");
            SwarmError::Plan(e)
        })?;

        tracing::info!(agents = ?plan.agent_names(), "plan accepted");
        Ok(PlannedTeam { plan, raw })
    }

    /// Plan a team for `team_task`, staff it, and have the boss run `task`.
    pub fn build(&mut self, team_task: &str, task: &str) -> Result<SwarmOutcome> {
        let PlannedTeam { plan, raw } = self.plan(team_task)?;

        tracing::info!("creating the workers");
        let workers = self.factory.create_worker_agents(plan.agents())?;
        for worker in workers {
            self.network.add_agent(worker);
        }
        let worker_names: Vec<String> = self
            .network
            .agent_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let boss_prompt = self.render(PromptKind::Boss, &[])?;
        let roster = self.render(
            PromptKind::SelectWorkers,
            &[("agents_json", raw.as_str()), ("task", task)],
        )?;
        let mut boss = self
            .factory
            .create_orchestrator(AgentRole::Boss, boss_prompt)?;
        boss.add_message_to_memory(roster);

        tracing::info!(agent = boss.name(), workers = worker_names.len(), "running boss");
        let output = boss.run_with(task, |reply| delegation::delegate(&mut self.network, reply))?;
        tracing::info!(agent = boss.name(), turns = boss.memory().len(), "boss finished");

        Ok(SwarmOutcome {
            plan,
            workers: worker_names,
            output,
        })
    }

    /// Run a registered worker by name.
    pub fn send_task_to_network_agent(&mut self, name: &str, task: &str) -> Result<String> {
        tracing::info!(agent = name, "sending task to network agent");
        self.network.send_task(name, task)
    }
}

/// Build and run a swarm. Both tasks are required and must not be blank.
pub fn run_swarm(
    backend: Arc<dyn LanguageModel>,
    config: &SwarmConfig,
    team_task: Option<&str>,
    task: Option<&str>,
) -> Result<SwarmOutcome> {
    fn non_blank(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.trim().is_empty())
    }

    let (Some(team_task), Some(task)) = (non_blank(team_task), non_blank(task)) else {
        return Err(SwarmError::UserError(
            "Both team_task and task parameters are required".to_string(),
        ));
    };

    Swarm::new(backend, config.clone()).build(team_task, task)
}

//! Built-in prompt templates.
//!
//! Each template can be overridden under `prompt_templates` in
//! `neosapiens.yaml`; overrides must only reference the variables listed in
//! [`PromptKind::variables`].

use super::template::{TemplateError, render_template, vars};
use std::collections::BTreeMap;

/// The prompts the swarm renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// System prompt of the planning agent. Variables: `team`.
    Orchestrator,
    /// System prompt of the boss agent. No variables.
    Boss,
    /// Message seeding the boss with the worker roster. Variables: `agents_json`, `task`.
    SelectWorkers,
}

impl PromptKind {
    pub const ALL: [PromptKind; 3] = [
        PromptKind::Orchestrator,
        PromptKind::Boss,
        PromptKind::SelectWorkers,
    ];

    /// Key under `prompt_templates`.
    pub fn key(self) -> &'static str {
        match self {
            PromptKind::Orchestrator => "orchestrator",
            PromptKind::Boss => "boss",
            PromptKind::SelectWorkers => "select_workers",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Variables a template of this kind may reference.
    pub fn variables(self) -> &'static [&'static str] {
        match self {
            PromptKind::Orchestrator => &["team"],
            PromptKind::Boss => &[],
            PromptKind::SelectWorkers => &["agents_json", "task"],
        }
    }

    pub fn default_template(self) -> &'static str {
        match self {
            PromptKind::Orchestrator => ORCHESTRATOR_TEMPLATE,
            PromptKind::Boss => BOSS_TEMPLATE,
            PromptKind::SelectWorkers => SELECT_WORKERS_TEMPLATE,
        }
    }
}

const ORCHESTRATOR_TEMPLATE: &str = r#"You are the Swarm Orchestrator. Your job is to design a team of specialised AI agents for the following team task:

{team}

First write a plan: a numbered list of the steps needed to complete the task. Then define one agent per distinct role. Give every agent a unique name, a system prompt describing its role and expertise, and rules constraining its behaviour.

Respond with a single JSON document inside a ```json fenced block, using exactly this shape:

```json
{{
  "plan": "1. First step 2. Second step",
  "agents": [
    {{
      "name": "Research Agent",
      "system_prompt": "You are a research specialist...",
      "rules": "Cite your sources. Be concise."
    }}
  ]
}}
```

Do not add any other fields."#;

const BOSS_TEMPLATE: &str = r#"You are the Swarm Orchestrator, the boss of a team of specialised AI agents. You receive the team roster as JSON and a task. Decide which agents should handle which parts of the task and combine their contributions into one final answer.

To hand part of the task to an agent, reply with a single ```json fenced block of this shape:

```json
{{"agent": "Research Agent", "task": "What the agent should do"}}
```

The agent's answer comes back as the next message. Delegate one part at a time, using the agent names from the roster exactly.

Keep the team's plan in mind and stay within each agent's rules."#;

const SELECT_WORKERS_TEMPLATE: &str = r#"These are the agents available to you, as JSON:

{agents_json}

Select the agents best suited to the following task and explain how each one contributes:

{task}"#;

/// Render a prompt, preferring a configured override over the built-in template.
pub fn render_prompt(
    kind: PromptKind,
    overrides: &BTreeMap<String, String>,
    values: &[(&str, &str)],
) -> Result<String, TemplateError> {
    let template = overrides
        .get(kind.key())
        .map(String::as_str)
        .unwrap_or_else(|| kind.default_template());

    render_template(template, &vars(values.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::prompt::template_variables;

    #[test]
    fn test_default_templates_reference_only_documented_variables() {
        for kind in PromptKind::ALL {
            let names = template_variables(kind.default_template()).unwrap();
            let expected: Vec<String> = kind.variables().iter().map(|s| s.to_string()).collect();
            assert_eq!(names, expected, "template {}", kind.key());
        }
    }

    #[test]
    fn test_orchestrator_prompt_embeds_team_and_schema() {
        let prompt = render_prompt(
            PromptKind::Orchestrator,
            &BTreeMap::new(),
            &[("team", "a customer support team")],
        )
        .unwrap();

        assert!(prompt.contains("a customer support team"));
        assert!(prompt.contains("```json\n{\n  \"plan\""));
        assert!(prompt.contains("\"system_prompt\""));
    }

    #[test]
    fn test_boss_prompt_describes_delegation() {
        let prompt = render_prompt(PromptKind::Boss, &BTreeMap::new(), &[]).unwrap();

        assert!(prompt.contains("```json\n{\"agent\": \"Research Agent\", \"task\": "));
    }

    #[test]
    fn test_override_wins() {
        let mut overrides = BTreeMap::new();
        overrides.insert("select_workers".to_string(), "{task} <- {agents_json}".to_string());

        let prompt = render_prompt(
            PromptKind::SelectWorkers,
            &overrides,
            &[("agents_json", "[]"), ("task", "write docs")],
        )
        .unwrap();
        assert_eq!(prompt, "write docs <- []");
    }

    #[test]
    fn test_keys_round_trip() {
        for kind in PromptKind::ALL {
            assert_eq!(PromptKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(PromptKind::from_key("worker"), None);
    }
}

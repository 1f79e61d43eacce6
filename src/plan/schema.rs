//! Plan and agent descriptor types.

use serde::Serialize;

/// A named role specification produced by the orchestrator, prior to being
/// instantiated into a runnable agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDescriptor {
    name: String,
    system_prompt: String,
    rules: String,
}

impl AgentDescriptor {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        rules: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            rules: rules.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn rules(&self) -> &str {
        &self.rules
    }
}

/// A validated plan plus the ordered list of agents that will execute it.
///
/// Serializes to exactly the wire shape the extractor accepts, so a
/// `PlanResult` can be handed back to a model (or re-extracted) verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResult {
    plan: String,
    agents: Vec<AgentDescriptor>,
}

impl PlanResult {
    pub fn new(plan: impl Into<String>, agents: Vec<AgentDescriptor>) -> Self {
        Self {
            plan: plan.into(),
            agents,
        }
    }

    /// The free-text plan.
    pub fn plan(&self) -> &str {
        &self.plan
    }

    /// Agent descriptors in the order they appeared in the payload.
    pub fn agents(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    /// Agent names in payload order.
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(AgentDescriptor::name).collect()
    }

    /// Serialize to pretty-printed JSON in the documented wire shape.
    pub fn to_json_pretty(&self) -> String {
        // Strings and vectors of strings always serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_serializes_with_snake_case_keys() {
        let agent = AgentDescriptor::new("A", "p1", "r1");
        let value = serde_json::to_value(&agent).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "A", "system_prompt": "p1", "rules": "r1"})
        );
    }

    #[test]
    fn plan_result_accessors() {
        let result = PlanResult::new(
            "do things",
            vec![
                AgentDescriptor::new("A", "p1", "r1"),
                AgentDescriptor::new("B", "p2", "r2"),
            ],
        );
        assert_eq!(result.plan(), "do things");
        assert_eq!(result.agent_names(), vec!["A", "B"]);
        assert_eq!(result.agents()[1].system_prompt(), "p2");
    }

    #[test]
    fn pretty_json_uses_wire_shape() {
        let result = PlanResult::new("p", vec![]);
        let json = result.to_json_pretty();
        assert!(json.starts_with("{\n  \"plan\": \"p\""));
        assert!(json.contains("\"agents\": []"));
    }
}

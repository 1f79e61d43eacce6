//! Implementation of the `neosapiens plan` command.

use super::build_backend;
use crate::backend::LanguageModel;
use crate::cli::PlanArgs;
use crate::config::SwarmConfig;
use crate::context::WorkspaceContext;
use crate::error::Result;
use crate::swarm::Swarm;
use std::sync::Arc;

/// Execute the `neosapiens plan` command.
pub fn cmd_plan(ctx: &WorkspaceContext, args: PlanArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let backend = build_backend(ctx, &config)?;

    println!("{}", plan_output(backend, config, &args)?);
    Ok(())
}

fn plan_output(backend: Arc<dyn LanguageModel>, config: SwarmConfig, args: &PlanArgs) -> Result<String> {
    let swarm = Swarm::new(backend, config);

    if args.raw {
        swarm.create_agents_by_boss(&args.team_task)
    } else {
        Ok(swarm.plan(&args.team_task)?.plan.to_json_pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwarmError;
    use crate::test_support::{ScriptedModel, support_team_reply};

    fn args(raw: bool) -> PlanArgs {
        PlanArgs {
            team_task: "a customer support team".to_string(),
            raw,
        }
    }

    #[test]
    fn test_plan_output_is_validated_json() {
        let model = ScriptedModel::new([support_team_reply()]);

        let out = plan_output(model, SwarmConfig::default(), &args(false)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["plan"], "1. Triage incoming tickets 2. Draft responses");
        assert_eq!(value["agents"][1]["name"], "Responder");
    }

    #[test]
    fn test_raw_output_skips_validation() {
        let model = ScriptedModel::new(["not a plan at all"]);

        let out = plan_output(model, SwarmConfig::default(), &args(true)).unwrap();
        assert_eq!(out, "not a plan at all");
    }

    #[test]
    fn test_invalid_reply_fails_without_raw() {
        let model = ScriptedModel::new(["not a plan at all"]);

        let err = plan_output(model, SwarmConfig::default(), &args(false)).unwrap_err();
        assert!(matches!(err, SwarmError::Plan(_)));
    }
}

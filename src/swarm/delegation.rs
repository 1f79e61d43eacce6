//! Boss-to-worker delegation.
//!
//! The boss hands work to a worker by replying with a ```` ```json ```` fenced
//! object naming the agent and the task:
//!
//! ````text
//! ```json
//! {"agent": "Researcher", "task": "Find three sources on tidal power"}
//! ```
//! ````
//!
//! The worker's reply is fed back to the boss as its next message.

use crate::error::{Result, SwarmError};
use crate::network::AgentNetwork;
use crate::plan::locate_json;
use serde::Deserialize;

/// A request from the boss to run one worker on a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Delegation {
    pub agent: String,
    pub task: String,
}

impl Delegation {
    /// The delegation in a boss reply, if it contains one.
    ///
    /// Only the first JSON fence is considered, and only an object with
    /// string `agent` and `task` fields counts.
    pub fn parse(reply: &str) -> Option<Self> {
        serde_json::from_str(locate_json(reply)).ok()
    }
}

/// Carry out the delegation in `reply`, if any, and return the message the
/// boss should see next.
///
/// Naming an agent that is not in the network is reported back to the boss
/// rather than failing the run. Worker failures are returned.
pub fn delegate(network: &mut AgentNetwork, reply: &str) -> Result<Option<String>> {
    let Some(Delegation { agent, task }) = Delegation::parse(reply) else {
        return Ok(None);
    };

    tracing::info!(agent = %agent, "boss delegated a task");
    match network.send_task(&agent, &task) {
        Ok(answer) => Ok(Some(format!("{} replied:\n{}", agent, answer))),
        Err(SwarmError::UnknownAgent(name)) => {
            tracing::warn!(agent = %name, "boss delegated to an unknown agent");
            Ok(Some(format!(
                "There is no agent named '{}'. Available agents: {}.",
                name,
                network.agent_names().join(", ")
            )))
        }
        Err(e) => Err(e),
    }
}

use crate::backend::{BackendError, CompletionRequest, LanguageModel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// In-memory language model that replays canned replies in order and records
/// every request it receives.
///
/// Once the script runs out, further calls fail with `BackendError::Failed`.
pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub(crate) fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.replies
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .len()
    }
}

impl LanguageModel for ScriptedModel {
    fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        self.requests
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(request.clone());

        self.replies
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .pop_front()
            .ok_or_else(|| BackendError::Failed {
                code: None,
                stderr: "scripted model has no replies left".to_string(),
            })
    }
}

/// A fenced planner reply describing a two-agent support team.
pub(crate) fn support_team_reply() -> String {
    r#"Here is the team:

```json
{
  "plan": "1. Triage incoming tickets 2. Draft responses",
  "agents": [
    {"name": "Triage", "system_prompt": "You sort support tickets.", "rules": "Label every ticket."},
    {"name": "Responder", "system_prompt": "You answer support tickets.", "rules": "Be polite."}
  ]
}
```
"#
    .to_string()
}

//! Runnable agent handles.

use super::AgentError;
use super::tools::ToolKind;
use crate::backend::{CompletionRequest, LanguageModel};
use crate::config::ResolvedAgentSettings;
use crate::plan::AgentDescriptor;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Sent after a reply that did not contain the stopping token.
const CONTINUE_MESSAGE: &str = "Continue.";

/// Unique identifier of an agent instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(Uuid);

impl AgentId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an agent is: its name, role prompt, and behavioral rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    pub name: String,
    pub system_prompt: String,
    pub rules: String,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            rules: String::new(),
        }
    }

    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }
}

impl From<&AgentDescriptor> for AgentSpec {
    fn from(descriptor: &AgentDescriptor) -> Self {
        Self::new(descriptor.name(), descriptor.system_prompt()).with_rules(descriptor.rules())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn in an agent's memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A runnable agent bound to a language model.
pub struct Agent {
    id: AgentId,
    spec: AgentSpec,
    tools: Vec<ToolKind>,
    max_loops: u32,
    stopping_token: String,
    max_tokens: u32,
    backend: Arc<dyn LanguageModel>,
    memory: Vec<Message>,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.spec.name)
            .field("tools", &self.tools)
            .field("max_loops", &self.max_loops)
            .field("stopping_token", &self.stopping_token)
            .field("memory_len", &self.memory.len())
            .finish()
    }
}

impl Agent {
    /// Create an agent.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidSpec`] if the name or system prompt is blank.
    pub fn new(
        spec: AgentSpec,
        settings: &ResolvedAgentSettings,
        max_tokens: u32,
        backend: Arc<dyn LanguageModel>,
    ) -> Result<Self, AgentError> {
        if spec.name.trim().is_empty() {
            return Err(AgentError::InvalidSpec {
                name: spec.name,
                reason: "agent name must not be empty".to_string(),
            });
        }
        if spec.system_prompt.trim().is_empty() {
            return Err(AgentError::InvalidSpec {
                name: spec.name,
                reason: "system prompt must not be empty".to_string(),
            });
        }

        Ok(Self {
            id: AgentId::new(),
            spec,
            tools: settings.tools.clone(),
            max_loops: settings.max_loops,
            stopping_token: settings.stopping_token.clone(),
            max_tokens,
            backend,
            memory: Vec::new(),
        })
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn tools(&self) -> &[ToolKind] {
        &self.tools
    }

    pub fn memory(&self) -> &[Message] {
        &self.memory
    }

    /// Append a user message that will be included in every later prompt.
    pub fn add_message_to_memory(&mut self, content: impl Into<String>) {
        self.memory.push(Message::user(content));
    }

    /// Run the agent on a task.
    ///
    /// Calls the backend up to `max_loops` times, stopping early once a reply
    /// contains the stopping token. Returns the last reply with the stopping
    /// token removed. Backend errors are returned as-is, without retry.
    pub fn run(&mut self, task: &str) -> Result<String, AgentError> {
        self.run_with(task, |_| Ok(None))
    }

    /// Like [`Agent::run`], but `follow_up` sees every reply that does not
    /// end the run.
    ///
    /// When `follow_up` returns a message, it becomes the next user turn in
    /// place of the continue prompt. An error from `follow_up` ends the run.
    pub fn run_with<E, F>(&mut self, task: &str, mut follow_up: F) -> Result<String, E>
    where
        E: From<AgentError>,
        F: FnMut(&str) -> Result<Option<String>, E>,
    {
        self.memory.push(Message::user(task));

        let mut reply = String::new();
        for loop_index in 0..self.max_loops {
            let request = CompletionRequest {
                agent: self.spec.name.clone(),
                prompt: self.render_prompt(),
                max_tokens: self.max_tokens,
            };

            tracing::debug!(agent = %self.spec.name, loop_index, "running agent loop");
            reply = self.backend.complete(&request).map_err(AgentError::from)?;
            self.memory.push(Message::assistant(reply.clone()));

            if reply.contains(&self.stopping_token) {
                break;
            }
            if loop_index + 1 < self.max_loops {
                let next = follow_up(&reply)?.unwrap_or_else(|| CONTINUE_MESSAGE.to_string());
                self.memory.push(Message::user(next));
            }
        }

        Ok(reply.replace(&self.stopping_token, "").trim().to_string())
    }

    /// Render the full prompt sent to the backend for the next loop.
    pub fn render_prompt(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(self.spec.system_prompt.trim());
        prompt.push_str("\n\n");

        if !self.spec.rules.trim().is_empty() {
            prompt.push_str("## Rules\n");
            prompt.push_str(self.spec.rules.trim());
            prompt.push_str("\n\n");
        }

        if !self.tools.is_empty() {
            prompt.push_str("## Tools\n");
            for tool in &self.tools {
                prompt.push_str(&format!("- {}: {}\n", tool, tool.description()));
            }
            prompt.push('\n');
        }

        prompt.push_str("## Conversation\n");
        for message in &self.memory {
            let speaker = match message.role {
                MessageRole::User => "User",
                MessageRole::Assistant => self.spec.name.as_str(),
            };
            prompt.push_str(&format!("{}: {}\n\n", speaker, message.content.trim()));
        }

        prompt.push_str(&format!(
            "Reply to the last message as {}. End your reply with {} when the task is complete.\n",
            self.spec.name, self.stopping_token
        ));
        prompt
    }
}

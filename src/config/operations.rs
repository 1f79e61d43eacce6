//! Config loading, validation, and serialization.

use super::model::SwarmConfig;
use super::types::AgentRole;
use crate::agent::prompt::{PromptKind, template_variables};
use crate::error::{Result, SwarmError};
use std::path::Path;

impl SwarmConfig {
    /// Load config from a YAML file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be read, parsed, or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SwarmError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map(Some)
    }

    /// Load config from a YAML file, falling back to defaults if it is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path)? {
            Some(config) => Ok(config),
            None => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SwarmConfig = serde_yaml::from_str(yaml)
            .map_err(|e| SwarmError::Config(format!("failed to parse neosapiens.yaml: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SwarmError::Config(format!("failed to serialize config: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `backend.command` must not be blank
    /// - `backend.timeout_seconds` and `backend.max_tokens` must be positive
    /// - per-role `max_loops` must be positive; `name` and `stopping_token`
    ///   must not be blank when set
    /// - `prompt_templates` keys must name a known prompt, and each template
    ///   must parse and only reference that prompt's variables
    pub fn validate(&self) -> Result<()> {
        if self.backend.command.trim().is_empty() {
            return Err(invalid("backend.command must not be empty"));
        }
        if self.backend.timeout_seconds == 0 {
            return Err(invalid("backend.timeout_seconds must be greater than 0"));
        }
        if self.backend.max_tokens == 0 {
            return Err(invalid("backend.max_tokens must be greater than 0"));
        }

        for role in [AgentRole::Planner, AgentRole::Boss, AgentRole::Worker] {
            let settings = self.settings(role);
            if settings.max_loops == Some(0) {
                return Err(invalid(&format!(
                    "{}.max_loops must be greater than 0",
                    role.key()
                )));
            }
            if matches!(settings.stopping_token.as_deref(), Some(t) if t.trim().is_empty()) {
                return Err(invalid(&format!(
                    "{}.stopping_token must not be empty",
                    role.key()
                )));
            }
            if matches!(settings.name.as_deref(), Some(n) if n.trim().is_empty()) {
                return Err(invalid(&format!("{}.name must not be empty", role.key())));
            }
        }

        for (key, template) in &self.prompt_templates {
            let kind = PromptKind::from_key(key).ok_or_else(|| {
                invalid(&format!(
                    "unknown prompt template '{}' (expected one of: {})",
                    key,
                    PromptKind::ALL.map(PromptKind::key).join(", ")
                ))
            })?;

            let names = template_variables(template)
                .map_err(|e| invalid(&format!("prompt template '{}': {}", key, e)))?;
            if let Some(unknown) = names.iter().find(|n| !kind.variables().contains(&n.as_str())) {
                return Err(invalid(&format!(
                    "prompt template '{}' references undefined variable '{}' (available: {})",
                    key,
                    unknown,
                    if kind.variables().is_empty() {
                        "none".to_string()
                    } else {
                        kind.variables().join(", ")
                    }
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> SwarmError {
    SwarmError::Config(format!("neosapiens.yaml validation failed: {}", message))
}

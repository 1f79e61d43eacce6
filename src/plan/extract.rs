//! Fenced-block location, JSON parsing, and schema validation.

use super::schema::{AgentDescriptor, PlanResult};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

/// First ```` ```json ```` fence in the text; the body is captured lazily so
/// the match ends at the first closing fence.
static JSON_FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("Invalid JSON fence regex")
});

/// Why a response could not be turned into a [`PlanResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Input was absent or contained only whitespace.
    #[error("input is empty")]
    EmptyInput,

    /// The candidate text is not syntactically valid JSON.
    #[error("malformed JSON: {message}")]
    MalformedJson {
        /// Message from the JSON parser.
        message: String,
    },

    /// The JSON parsed but does not have the required shape.
    #[error("schema violation at '{path}': {reason}")]
    SchemaViolation {
        /// Path of the offending field, e.g. `agents[1].system_prompt`.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Extract and validate a plan from a (possibly markdown-wrapped) response.
///
/// The first ```` ```json ```` fenced block wins; without one, the whole
/// trimmed input is treated as JSON. Anything outside the first fence is
/// ignored.
///
/// # Errors
///
/// * [`ExtractionError::EmptyInput`] - `input` is `None` or blank
/// * [`ExtractionError::MalformedJson`] - the candidate text does not parse
/// * [`ExtractionError::SchemaViolation`] - a required field is missing or
///   has the wrong type
///
/// # Example
///
/// ```ignore
/// let result = extract_plan(r#"{"plan": "p", "agents": []}"#)?;
/// assert_eq!(result.plan(), "p");
/// assert_eq!(extract_plan(None), Err(ExtractionError::EmptyInput));
/// ```
pub fn extract_plan<'a>(input: impl Into<Option<&'a str>>) -> Result<PlanResult, ExtractionError> {
    let input = match input.into() {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            tracing::info!("plan extraction failed: input is empty");
            return Err(ExtractionError::EmptyInput);
        }
    };

    let candidate = locate_json(input);

    let value: Value = serde_json::from_str(candidate).map_err(|e| {
        tracing::info!(error = %e, "plan extraction failed: JSON decoding failed");
        ExtractionError::MalformedJson {
            message: e.to_string(),
        }
    })?;

    validate_plan(&value).inspect_err(|e| {
        tracing::info!(error = %e, "plan extraction failed: response does not match schema");
    })
}

/// Return the trimmed body of the first JSON fence, or the trimmed input.
pub(crate) fn locate_json(input: &str) -> &str {
    match JSON_FENCE_REGEX.captures(input).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim(),
        None => input.trim(),
    }
}

fn validate_plan(value: &Value) -> Result<PlanResult, ExtractionError> {
    let root = expect_object(value, "$")?;

    let plan = required_string(root, "plan", "plan")?;

    let agents_value = root
        .get("agents")
        .ok_or_else(|| missing_field("agents"))?;
    let agents_array = agents_value
        .as_array()
        .ok_or_else(|| wrong_type("agents", "array", agents_value))?;

    let mut agents = Vec::with_capacity(agents_array.len());
    for (index, agent_value) in agents_array.iter().enumerate() {
        let path = format!("agents[{}]", index);
        let agent = expect_object(agent_value, &path)?;

        agents.push(AgentDescriptor::new(
            required_string(agent, "name", &format!("{}.name", path))?,
            required_string(agent, "system_prompt", &format!("{}.system_prompt", path))?,
            required_string(agent, "rules", &format!("{}.rules", path))?,
        ));
    }

    Ok(PlanResult::new(plan, agents))
}

fn expect_object<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, ExtractionError> {
    value
        .as_object()
        .ok_or_else(|| wrong_type(path, "object", value))
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, ExtractionError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(path, "string", other)),
        None => Err(missing_field(path)),
    }
}

fn missing_field(path: &str) -> ExtractionError {
    ExtractionError::SchemaViolation {
        path: path.to_string(),
        reason: "field is required".to_string(),
    }
}

fn wrong_type(path: &str, expected: &str, found: &Value) -> ExtractionError {
    ExtractionError::SchemaViolation {
        path: path.to_string(),
        reason: format!("expected {}, found {}", expected, json_kind(found)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

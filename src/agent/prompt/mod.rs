//! Prompt rendering for agents.
//!
//! - **Template**: `{variable}` substitution engine shared by prompts and
//!   backend command templates
//! - **Presets**: built-in orchestrator, boss, and worker-roster prompts
//!
//! Use `{{` / `}}` to render literal braces (needed for JSON examples).

mod presets;
mod template;

pub use presets::{PromptKind, render_prompt};
pub use template::{TemplateError, render_template, template_variables};

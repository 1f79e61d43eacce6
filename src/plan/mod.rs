//! Structured-response extraction for orchestrator output.
//!
//! The orchestrator agent answers a team task with a JSON document describing
//! a plan and the worker agents needed to carry it out, usually wrapped in a
//! fenced ```` ```json ```` block inside otherwise free-form prose:
//!
//! ````text
//! Here is the team:
//!
//! ```json
//! {
//!   "plan": "1. Research 2. Write",
//!   "agents": [
//!     {"name": "Researcher", "system_prompt": "...", "rules": "..."}
//!   ]
//! }
//! ```
//! ````
//!
//! [`extract_plan`] locates that document, parses it, and validates it into a
//! [`PlanResult`]. It is all-or-nothing: either every field is present with the
//! right type or the call fails with a categorized [`ExtractionError`].

mod extract;
mod schema;


pub(crate) use extract::locate_json;
pub use extract::{ExtractionError, extract_plan};
pub use schema::{AgentDescriptor, PlanResult};

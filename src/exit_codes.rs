//! Exit code constants for the neosapiens CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Plan failure (the orchestrator response did not yield a plan)
//! - 3: Agent failure (an agent could not be constructed or found)
//! - 4: Backend failure (the language model command failed)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Plan failure: empty, malformed, or schema-violating orchestrator output.
pub const PLAN_FAILURE: i32 = 2;

/// Agent failure: invalid agent spec or unknown agent name.
pub const AGENT_FAILURE: i32 = 3;

/// Backend failure: missing credentials, spawn failure, timeout, non-zero exit.
pub const BACKEND_FAILURE: i32 = 4;

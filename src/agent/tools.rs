//! Tool capabilities an agent may be granted.
//!
//! Tools are declared, not routed: the agent's prompt lists what it may use
//! and the backend model (or the CLI wrapping it) is responsible for acting
//! on them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Browser,
    Terminal,
    FileEditor,
    CreateFile,
}

impl ToolKind {
    /// Every tool, in the order workers receive them by default.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Browser,
        ToolKind::Terminal,
        ToolKind::CreateFile,
        ToolKind::FileEditor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Browser => "browser",
            ToolKind::Terminal => "terminal",
            ToolKind::FileEditor => "file_editor",
            ToolKind::CreateFile => "create_file",
        }
    }

    /// One-line description rendered into agent prompts.
    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Browser => "search the web and read pages",
            ToolKind::Terminal => "run shell commands and read their output",
            ToolKind::FileEditor => "edit existing files",
            ToolKind::CreateFile => "create new files with given contents",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

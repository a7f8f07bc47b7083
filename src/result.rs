//! Outcome of a completed invocation.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Result of a single command execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    /// The exact argument vector that was run
    pub command: Vec<String>,

    /// Process exit code (0 is success)
    pub exit_code: i32,

    /// Combined stdout and stderr, or `None` when output was ignored
    #[serde(serialize_with = "serialize_output")]
    pub output: Option<Vec<u8>>,
}

impl CommandResult {
    pub fn new(command: Vec<String>, exit_code: i32, output: Option<Vec<u8>>) -> Self {
        Self {
            command,
            exit_code,
            output,
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured output decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn output_lossy(&self) -> Option<Cow<'_, str>> {
        self.output.as_deref().map(String::from_utf8_lossy)
    }

    /// Format as JSON for programmatic consumption
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn serialize_output<S: Serializer>(output: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
    match output {
        Some(bytes) => serializer.serialize_some(&String::from_utf8_lossy(bytes)),
        None => serializer.serialize_none(),
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` exited with code {}", self.command.join(" "), self.exit_code)
    }
}

//! Error types for invocations and configuration.

use crate::result::CommandResult;

/// Everything that can go wrong between building a command and handing back
/// its [`CommandResult`].
#[derive(Debug, thiserror::Error)]
pub enum ShError {
    /// The child process could not be created.
    #[error("failed to spawn `{}`: {source}", .command.join(" "))]
    Spawn {
        command: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// Pipe setup, reading output or waiting on the child failed.
    #[error("i/o error while running `{}`: {source}", .command.join(" "))]
    Io {
        command: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The command completed with a nonzero exit code and `throw_at_error` is set.
    #[error("command failed: {0}")]
    Invocation(Box<CommandResult>),

    #[error("unknown configuration key: {0}")]
    UnknownConfigKey(String),

    #[error("invalid named argument '{0}', expected KEY=VALUE")]
    InvalidNamedArgument(String),
}

impl ShError {
    /// The completed result carried by an [`ShError::Invocation`].
    #[must_use]
    pub fn result(&self) -> Option<&CommandResult> {
        match self {
            Self::Invocation(result) => Some(&**result),
            _ => None,
        }
    }

    /// The argument vector this error relates to, when there is one.
    #[must_use]
    pub fn command(&self) -> Option<&[String]> {
        match self {
            Self::Spawn { command, .. } | Self::Io { command, .. } => Some(command.as_slice()),
            Self::Invocation(result) => Some(result.command.as_slice()),
            Self::UnknownConfigKey(_) | Self::InvalidNamedArgument(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShError>;

//! Argument vector construction.
//!
//! Turns a program name, its subcommand chain, named arguments and positional
//! arguments into the exact ordered list of strings handed to the OS. This is
//! a pure transformation; nothing here touches a process.

use crate::args::{ArgValue, NamedArg};
use crate::utils::translate;

/// A named argument resolved to its option token and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ArgSpec {
    Flag { token: String, present: bool },
    Scalar { token: String, value: String },
    List { token: String, values: Vec<String> },
}

impl ArgSpec {
    /// `None` for values with no command-line rendering.
    fn parse(arg: &NamedArg) -> Option<Self> {
        let token = option_token(&arg.key);
        match &arg.value {
            ArgValue::Flag(present) => Some(Self::Flag {
                token,
                present: *present,
            }),
            ArgValue::Scalar(value) => Some(Self::Scalar {
                token,
                value: value.clone(),
            }),
            ArgValue::List(values) => Some(Self::List {
                token,
                values: values.clone(),
            }),
            ArgValue::Unrecognized => None,
        }
    }

    fn emit(self, command: &mut Vec<String>) {
        match self {
            Self::Flag { token, present } => {
                if present {
                    command.push(token);
                }
            }
            Self::Scalar { token, value } => {
                command.push(token);
                command.push(value);
            }
            Self::List { token, values } => {
                for value in values {
                    command.push(token.clone());
                    command.push(value);
                }
            }
        }
    }
}

/// Derive the option token for a named-argument key.
///
/// Keys are translated first. A single character gives the short form `-k`,
/// anything longer the long form `--key`.
#[must_use]
pub fn option_token(key: &str) -> String {
    let key = translate(key);
    if key.chars().count() == 1 {
        format!("-{key}")
    } else {
        format!("--{key}")
    }
}

/// Build the argument vector: program, subcommands, named arguments in the
/// order given, then positional arguments.
///
/// `program` and `subcommands` are emitted as-is; callers pass them already
/// translated (a [`crate::Binding`] translates on construction).
#[must_use]
pub fn serialize(
    program: &str,
    subcommands: &[String],
    positional: &[String],
    named: &[NamedArg],
) -> Vec<String> {
    let mut command = Vec::with_capacity(1 + subcommands.len() + positional.len() + named.len());
    command.push(program.to_string());
    command.extend(subcommands.iter().cloned());

    for arg in named {
        match ArgSpec::parse(arg) {
            Some(spec) => spec.emit(&mut command),
            None => tracing::debug!(key = %arg.key, "dropping named argument with unrecognized value"),
        }
    }

    command.extend(positional.iter().cloned());
    command
}

//! Bindings: a program name plus a subcommand chain, ready to be called.

use crate::args::{ArgValue, NamedArg};
use crate::config::SharedConfig;
use crate::error::{Result, ShError};
use crate::executor;
use crate::result::CommandResult;
use crate::serializer;
use crate::utils::translate;

/// A not-yet-executed description of a program invocation.
///
/// Bindings are immutable; [`Binding::sub`] returns a new one. Every binding
/// created from the same [`crate::Sh`] shares its configuration and reads it
/// at call time.
#[derive(Debug, Clone)]
pub struct Binding {
    program: String,
    subcommands: Vec<String>,
    config: SharedConfig,
}

impl Binding {
    pub(crate) fn new(program: &str, config: SharedConfig) -> Self {
        Self {
            program: translate(program),
            subcommands: Vec::new(),
            config,
        }
    }

    /// Extend the chain with a subcommand. `__` in `name` becomes `-`.
    #[must_use]
    pub fn sub(&self, name: &str) -> Self {
        let mut subcommands = self.subcommands.clone();
        subcommands.push(translate(name));
        Self {
            program: self.program.clone(),
            subcommands,
            config: self.config.clone(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn subcommands(&self) -> &[String] {
        &self.subcommands
    }

    #[must_use]
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Whether the program resolves to an executable on `PATH`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Build the argument vector this call would run, without running it.
    pub fn command_line<P, N>(&self, positional: P, named: N) -> Vec<String>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<NamedArg>,
    {
        let positional: Vec<String> = positional.into_iter().map(Into::into).collect();
        let named: Vec<NamedArg> = named.into_iter().map(Into::into).collect();
        serializer::serialize(&self.program, &self.subcommands, &positional, &named)
    }

    /// Run the program with positional and named arguments.
    ///
    /// Named arguments are `(key, value)` pairs rendered in the order given;
    /// positional arguments follow them.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The program cannot be spawned ([`ShError::Spawn`])
    /// - Output cannot be read or the child cannot be waited on ([`ShError::Io`])
    /// - The exit code is nonzero while `throw_at_error` is set ([`ShError::Invocation`])
    pub fn call<P, N>(&self, positional: P, named: N) -> Result<CommandResult>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<NamedArg>,
    {
        self.run_command(self.command_line(positional, named))
    }

    /// Run the program with no arguments.
    ///
    /// # Errors
    ///
    /// See [`Binding::call`].
    pub fn run(&self) -> Result<CommandResult> {
        self.run_command(self.command_line(Vec::<String>::new(), Vec::<NamedArg>::new()))
    }

    /// Start a fluent call on this binding.
    #[must_use]
    pub fn invoke(&self) -> Invocation<'_> {
        Invocation {
            binding: self,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    fn run_command(&self, command: Vec<String>) -> Result<CommandResult> {
        let config = self.config.snapshot();
        let (exit_code, output) = executor::execute(&command, config.ignore_output)?;
        let result = CommandResult::new(command, exit_code, output);

        if config.throw_at_error && !result.success() {
            return Err(ShError::Invocation(Box::new(result)));
        }
        Ok(result)
    }
}

/// Arguments collected for one call of a [`Binding`].
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    binding: &'a Binding,
    positional: Vec<String>,
    named: Vec<NamedArg>,
}

impl Invocation<'_> {
    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    #[must_use]
    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.positional.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append a named argument of any kind.
    #[must_use]
    pub fn named(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.named.push(NamedArg::new(key, value));
        self
    }

    #[must_use]
    pub fn flag(self, key: impl Into<String>, present: bool) -> Self {
        self.named(key, ArgValue::Flag(present))
    }

    #[must_use]
    pub fn opt(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.named(key, ArgValue::Scalar(value.into()))
    }

    /// An option repeated once per value.
    #[must_use]
    pub fn opts<I>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.named(key, ArgValue::List(values.into_iter().map(Into::into).collect()))
    }

    #[must_use]
    pub fn command_line(&self) -> Vec<String> {
        serializer::serialize(
            &self.binding.program,
            &self.binding.subcommands,
            &self.positional,
            &self.named,
        )
    }

    /// # Errors
    ///
    /// See [`Binding::call`].
    pub fn run(self) -> Result<CommandResult> {
        self.binding.run_command(self.command_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigKey};

    fn binding(program: &str) -> Binding {
        Binding::new(program, SharedConfig::new(Config::default()))
    }

    #[test]
    fn test_program_is_translated() {
        assert_eq!(binding("apt__get").program(), "apt-get");
    }

    #[test]
    fn test_sub_appends_and_leaves_parent_untouched() {
        let git = binding("git");
        let remote = git.sub("remote");
        let add = remote.sub("set__url");
        assert!(git.subcommands().is_empty());
        assert_eq!(remote.subcommands(), ["remote"]);
        assert_eq!(add.subcommands(), ["remote", "set-url"]);
        assert!(add.config().ptr_eq(git.config()));
    }

    #[test]
    fn test_command_line_escapes_keys() {
        let cmd = binding("true")
            .sub("sub__command")
            .command_line(Vec::<String>::new(), [("long__option", true)]);
        assert_eq!(cmd, ["true", "sub-command", "--long-option"]);
    }

    #[test]
    fn test_invocation_builder_order() {
        let b = binding("true");
        let cmd = b
            .invoke()
            .arg("param1")
            .flag("o", true)
            .opt("option", "value")
            .opts("a", ["x", "y"])
            .flag("skip", false)
            .arg("param2")
            .command_line();
        assert_eq!(
            cmd,
            ["true", "-o", "--option", "value", "-a", "x", "-a", "y", "param1", "param2"]
        );
    }

    #[test]
    fn test_is_available() {
        assert!(!binding("shcall-definitely-not-a-program").is_available());
    }

    #[cfg(unix)]
    #[test]
    fn test_config_read_at_call_time() {
        let b = binding("false");
        assert!(b.run().is_ok());
        b.config().set(ConfigKey::ThrowAtError, true);
        let err = b.run().unwrap_err();
        assert_eq!(err.result().map(|r| r.command.clone()), Some(vec!["false".to_string()]));
    }
}

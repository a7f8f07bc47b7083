//! CLI module containing the main entry point logic.
//!
//! Kept out of main.rs so the argument handling can be unit tested.

use crate::args::{ArgValue, NamedArg};
use crate::config::{Config, ConfigKey};
use crate::engine::Sh;
use crate::error::{Result, ShError};
use crate::result::CommandResult;
use clap::Parser as ClapParser;
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "SHCALL_LOG";

/// Exit code used when the program could not be started at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// CLI arguments for shcall. Options go before PROGRAM; everything from
/// PROGRAM on is passed through untouched, hyphens included.
#[derive(ClapParser, Debug)]
#[command(name = "shcall")]
#[command(version = PKG_VERSION)]
#[command(about = "Run a program from a structured description of its call", long_about = None)]
struct Cli {
    /// Program to run, then its positional arguments (placed after all named arguments)
    #[arg(
        value_name = "PROGRAM [POSITIONAL]...",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        conflicts_with = "spec"
    )]
    command: Vec<String>,

    /// Subcommand to insert after the program (repeatable, in order)
    #[arg(short, long = "sub", value_name = "NAME")]
    subs: Vec<String>,

    /// Named argument KEY=VALUE; true/false make a flag, a JSON string array a repeated option, anything else is the value
    #[arg(short, long = "named", value_name = "KEY=VALUE")]
    named: Vec<String>,

    /// Read a JSON invocation description from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    spec: Option<PathBuf>,

    /// Treat a nonzero exit code as an error
    #[arg(long)]
    throw_at_error: bool,

    /// Discard the program's output
    #[arg(long)]
    ignore_output: bool,

    /// Print the argument vector as JSON instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    output_format: OutputFormatArg,

    /// Log at debug level unless SHCALL_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormatArg {
    /// Write the captured output verbatim (default)
    Text,
    /// Write the full result as JSON
    Json,
}

/// JSON description of one call, as accepted by `--spec`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvocationSpec {
    pub program: String,
    #[serde(default)]
    pub subcommands: Vec<String>,
    #[serde(default)]
    pub positional: Vec<String>,
    /// Ordered `[key, value]` pairs.
    #[serde(default)]
    pub named: Vec<(String, serde_json::Value)>,
}

impl InvocationSpec {
    /// Load a description from `path`, or from stdin when `path` is `-`.
    ///
    /// # Errors
    ///
    /// Returns an error message if the file cannot be read or is not a valid description.
    pub fn load(path: &Path) -> std::result::Result<Self, String> {
        let content = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Error reading stdin: {e}"))?;
            buf
        } else {
            std::fs::read_to_string(path)
                .map_err(|e| format!("Error reading file '{}': {e}", path.display()))?
        };
        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid invocation description: {e}"))
    }

    fn named_args(&self) -> Vec<NamedArg> {
        self.named
            .iter()
            .map(|(key, value)| NamedArg::new(key.clone(), value.clone()))
            .collect()
    }
}

/// Parse `KEY=VALUE`.
///
/// `true` and `false` become a flag, a JSON array of strings becomes a
/// repeated option and a JSON string literal (`"true"`) is unquoted.
/// Anything else, numbers included, is taken verbatim as the value.
///
/// # Errors
///
/// Returns [`ShError::InvalidNamedArgument`] when there is no `=`.
pub fn parse_named(raw: &str) -> Result<NamedArg> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ShError::InvalidNamedArgument(raw.to_string()))?;
    let parsed = match serde_json::from_str::<serde_json::Value>(value) {
        Ok(json @ (serde_json::Value::Bool(_) | serde_json::Value::String(_) | serde_json::Value::Array(_))) => {
            ArgValue::from(json)
        }
        _ => ArgValue::Unrecognized,
    };
    let value = match parsed {
        ArgValue::Unrecognized => ArgValue::Scalar(value.to_string()),
        parsed => parsed,
    };
    Ok(NamedArg::new(key, value))
}

/// A fully resolved call: the engine to run it on and its arguments.
struct Plan {
    sh: Sh,
    program: String,
    subcommands: Vec<String>,
    positional: Vec<String>,
    named: Vec<NamedArg>,
}

impl Plan {
    fn from_cli(cli: Cli, spec: Option<InvocationSpec>, base: Config) -> std::result::Result<Self, String> {
        let mut config = base;
        if cli.throw_at_error {
            config.set(ConfigKey::ThrowAtError, true);
        }
        if cli.ignore_output {
            config.set(ConfigKey::IgnoreOutput, true);
        }

        let (program, mut subcommands, positional, mut named) = match spec {
            Some(spec) => {
                let named = spec.named_args();
                (spec.program, spec.subcommands, spec.positional, named)
            }
            None => {
                let (program, rest) = cli
                    .command
                    .split_first()
                    .ok_or_else(|| "Error: no program given (pass PROGRAM or --spec)".to_string())?;
                (program.clone(), Vec::new(), rest.to_vec(), Vec::new())
            }
        };

        subcommands.extend(cli.subs);
        for raw in &cli.named {
            named.push(parse_named(raw).map_err(|e| format!("Error: {e}"))?);
        }

        Ok(Self {
            sh: Sh::with_config(config),
            program,
            subcommands,
            positional,
            named,
        })
    }

    fn binding(&self) -> crate::Binding {
        self.subcommands
            .iter()
            .fold(self.sh.cmd(&self.program), |binding, sub| binding.sub(sub))
    }

    fn command_line(&self) -> Vec<String> {
        self.binding()
            .command_line(self.positional.iter().cloned(), self.named.iter().cloned())
    }

    fn run(&self) -> Result<CommandResult> {
        self.binding()
            .call(self.positional.iter().cloned(), self.named.iter().cloned())
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_result(result: &CommandResult, format: OutputFormatArg) {
    match format {
        OutputFormatArg::Text => {
            if let Some(output) = &result.output {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = stdout.write_all(output).and_then(|()| stdout.flush()) {
                    crate::fatal_error(&format!("Error writing output: {e}"));
                }
            }
        }
        OutputFormatArg::Json => println!("{}", result.to_json()),
    }
}

/// Main CLI logic.
pub fn run_cli() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let spec = match &cli.spec {
        Some(path) => Some(InvocationSpec::load(path).unwrap_or_else(|e| crate::fatal_error(&e))),
        None => None,
    };

    let output_format = cli.output_format;
    let dry_run = cli.dry_run;
    let plan = Plan::from_cli(cli, spec, Config::from_env()).unwrap_or_else(|e| crate::fatal_error(&e));

    if dry_run {
        println!(
            "{}",
            serde_json::to_string(&plan.command_line()).unwrap_or_default()
        );
        return;
    }

    match plan.run() {
        Ok(result) => {
            print_result(&result, output_format);
            std::process::exit(result.exit_code);
        }
        Err(ShError::Invocation(result)) => {
            print_result(&result, output_format);
            crate::fatal_error(&format!("Error: {}", ShError::Invocation(result)));
        }
        Err(e @ ShError::Spawn { .. }) => {
            eprintln!("Error: {e}");
            std::process::exit(SPAWN_FAILURE_EXIT_CODE);
        }
        Err(e) => crate::fatal_error(&format!("Error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shcall").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_named_json_values() {
        assert_eq!(parse_named("n=true").unwrap().value, ArgValue::Flag(true));
        assert_eq!(parse_named("n=false").unwrap().value, ArgValue::Flag(false));
        assert_eq!(
            parse_named(r#"a=["v1","v2"]"#).unwrap().value,
            ArgValue::List(vec!["v1".to_string(), "v2".to_string()])
        );
        assert_eq!(
            parse_named(r#"m="true""#).unwrap().value,
            ArgValue::Scalar("true".to_string())
        );
    }

    #[test]
    fn test_parse_named_plain_strings() {
        let arg = parse_named("message=hello world").unwrap();
        assert_eq!(arg.key, "message");
        assert_eq!(arg.value, ArgValue::Scalar("hello world".to_string()));
        // Only the first '=' splits.
        assert_eq!(
            parse_named("define=a=b").unwrap().value,
            ArgValue::Scalar("a=b".to_string())
        );
        assert_eq!(parse_named("o=").unwrap().value, ArgValue::Scalar(String::new()));
    }

    #[test]
    fn test_parse_named_numbers_and_null_stay_text() {
        assert_eq!(parse_named("depth=1").unwrap().value, ArgValue::Scalar("1".to_string()));
        assert_eq!(parse_named("n=5").unwrap().value, ArgValue::Scalar("5".to_string()));
        assert_eq!(parse_named("x=null").unwrap().value, ArgValue::Scalar("null".to_string()));
        assert_eq!(
            parse_named(r#"o={"a":1}"#).unwrap().value,
            ArgValue::Scalar(r#"{"a":1}"#.to_string())
        );
        assert_eq!(
            parse_named(r#"l=["a",1]"#).unwrap().value,
            ArgValue::Scalar(r#"["a",1]"#.to_string())
        );
    }

    #[test]
    fn test_plan_keeps_numeric_named_value() {
        let cli = parse(&["--dry-run", "-s", "log", "-n", "n=5", "git"]);
        let plan = Plan::from_cli(cli, None, Config::default()).unwrap();
        assert_eq!(plan.command_line(), ["git", "log", "-n", "5"]);
    }

    #[test]
    fn test_program_flags_are_not_read_as_options() {
        let cli = parse(&["--dry-run", "echo", "-n", "x"]);
        assert!(cli.named.is_empty());
        let plan = Plan::from_cli(cli, None, Config::default()).unwrap();
        assert_eq!(plan.command_line(), ["echo", "-n", "x"]);

        let cli = parse(&["sh", "--sub", "-s", "-v"]);
        assert!(cli.subs.is_empty());
        assert!(!cli.verbose);
        assert_eq!(cli.command, ["sh", "--sub", "-s", "-v"]);
    }

    #[test]
    fn test_parse_named_requires_equals() {
        assert!(matches!(
            parse_named("verbose"),
            Err(ShError::InvalidNamedArgument(ref raw)) if raw == "verbose"
        ));
    }

    #[test]
    fn test_plan_from_flags() {
        let cli = parse(&["-s", "remote", "-s", "set__url", "-n", "push=true", "git", "origin", "-x"]);
        let plan = Plan::from_cli(cli, None, Config::default()).unwrap();
        assert_eq!(
            plan.command_line(),
            ["git", "remote", "set-url", "--push", "origin", "-x"]
        );
        assert_eq!(plan.sh.config(), Config::default());
    }

    #[test]
    fn test_plan_applies_config_flags_over_base() {
        let cli = parse(&["--throw-at-error", "true"]);
        let base = Config {
            throw_at_error: false,
            ignore_output: true,
        };
        let plan = Plan::from_cli(cli, None, base).unwrap();
        assert_eq!(
            plan.sh.config(),
            Config {
                throw_at_error: true,
                ignore_output: true,
            }
        );
    }

    #[test]
    fn test_plan_requires_program() {
        let cli = parse(&["--dry-run"]);
        assert!(Plan::from_cli(cli, None, Config::default()).is_err());
    }

    #[test]
    fn test_plan_from_spec_appends_cli_parts() {
        let spec: InvocationSpec = serde_json::from_str(
            r#"{"program": "true", "subcommands": ["a"], "positional": ["p1"], "named": [["x", "1"], ["long", true]]}"#,
        )
        .unwrap();
        let cli = parse(&["--spec", "ignored.json", "-s", "b", "-n", "y=two"]);
        let plan = Plan::from_cli(cli, Some(spec), Config::default()).unwrap();
        assert_eq!(
            plan.command_line(),
            ["true", "a", "b", "-x", "1", "--long", "-y", "two", "p1"]
        );
    }

    #[test]
    fn test_spec_rejects_unknown_fields() {
        assert!(serde_json::from_str::<InvocationSpec>(r#"{"program": "true", "env": {}}"#).is_err());
    }

    #[test]
    fn test_spec_conflicts_with_program() {
        let result = Cli::try_parse_from(["shcall", "--spec", "x.json", "true"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_spec_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("call.json");
        std::fs::write(&path, r#"{"program": "echo", "named": [["n", true]]}"#).unwrap();
        let spec = InvocationSpec::load(&path).unwrap();
        assert_eq!(spec.program, "echo");
        assert_eq!(spec.named_args(), vec![NamedArg::new("n", true)]);

        let missing = InvocationSpec::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(missing.contains("Error reading file"));
    }
}

//! # shcall
//!
//! Run an external program from a structured description of its call.
//!
//! ## Usage
//!
//! - Plain call: `shcall echo hello`
//! - Subcommands and named arguments: `shcall -s log -n n=5 -n oneline=true git`
//! - From a JSON description: `shcall --spec call.json`
//! - Preview the argument vector: `shcall --dry-run -n l=true ls /tmp`

/// Entry point for the CLI tool.
fn main() {
    shcall::cli::run_cli();
}

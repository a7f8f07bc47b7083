//! # shcall
//!
//! Call external programs as fluent Rust expressions. A program name, a chain
//! of subcommands, named arguments and positional arguments go in; the exact
//! argument vector, the exit code and the combined output come back.
//!
//! ```no_run
//! use shcall::{ArgValue, Sh};
//!
//! let sh = Sh::new();
//! let result = sh
//!     .cmd("echo")
//!     .call(["test"], [("n", ArgValue::from(true))])?;
//! assert_eq!(result.output_lossy().as_deref(), Some("test"));
//! # Ok::<(), shcall::ShError>(())
//! ```
//!
//! Names cannot always contain a hyphen where they are written as Rust
//! identifiers, so `__` in a program, subcommand or key stands for `-`.

pub mod args;
pub mod binding;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod result;
pub mod serializer;
pub mod utils;

pub use args::{ArgValue, NamedArg};
pub use binding::{Binding, Invocation};
pub use config::{Config, ConfigKey, SharedConfig};
pub use engine::{Sh, sh};
pub use error::{Result, ShError};
pub use result::CommandResult;

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

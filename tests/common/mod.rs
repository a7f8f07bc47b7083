//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Helper to get the compiled binary path
pub fn get_binary_path() -> PathBuf {
    // Cargo sets this for integration tests of crates with a [[bin]] target
    if let Some(path) = option_env!("CARGO_BIN_EXE_shcall") {
        return PathBuf::from(path);
    }

    let mut path = env::current_exe().unwrap();
    path.pop(); // Remove test executable name

    // Check if we're in a 'deps' directory (integration tests)
    if path.ends_with("deps") {
        path.pop(); // Go up to debug or release
    }

    path.push("shcall");
    path
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to write a JSON invocation description into a directory
pub fn create_spec_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("call.json");
    fs::write(&path, content).unwrap();
    path
}

/// Helper to check if a program is available on the system
pub fn is_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper to create a Command with test environment
/// Clears `SHCALL_*` variables so the caller's shell cannot change behavior
pub fn test_command(binary: &PathBuf) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env_remove("SHCALL_THROW_AT_ERROR")
        .env_remove("SHCALL_IGNORE_OUTPUT")
        .env_remove("SHCALL_LOG");
    cmd
}

/// Collect string literals into an owned argument vector
pub fn argv(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

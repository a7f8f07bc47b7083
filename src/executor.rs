//! Process execution: spawn, capture, wait.
//!
//! The child's stderr is merged into its stdout by handing both descriptors
//! the write end of one pipe, so the captured bytes interleave the way they
//! would on a terminal. No shell is involved; the argument vector is passed
//! to the OS literally.

use crate::error::{Result, ShError};
use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

/// Run `command` to completion.
///
/// Returns the exit code and the combined output. When `ignore_output` is set
/// both streams go to the null device and the output is `None`; otherwise the
/// stream is read to EOF and returned, even if empty.
///
/// # Errors
///
/// Returns `Err` if:
/// - The command is empty or the program cannot be spawned ([`ShError::Spawn`])
/// - The pipe cannot be created, read, or the child cannot be waited on ([`ShError::Io`])
pub fn execute(command: &[String], ignore_output: bool) -> Result<(i32, Option<Vec<u8>>)> {
    let Some((program, args)) = command.split_first() else {
        return Err(ShError::Spawn {
            command: Vec::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
        });
    };

    let mut cmd = Command::new(program);
    cmd.args(args);

    tracing::debug!(?command, ignore_output, "spawning");

    if ignore_output {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        let mut child = cmd.spawn().map_err(|source| spawn_error(command, source))?;
        let status = child.wait().map_err(|source| io_error(command, source))?;
        return Ok((exit_code(status, command), None));
    }

    let (mut reader, writer) = io::pipe().map_err(|source| io_error(command, source))?;
    let stderr_writer = writer
        .try_clone()
        .map_err(|source| io_error(command, source))?;
    cmd.stdout(writer).stderr(stderr_writer);

    let mut child = cmd.spawn().map_err(|source| spawn_error(command, source))?;
    // The Command still holds our copies of the write end; EOF only arrives
    // once they are closed.
    drop(cmd);

    let mut output = Vec::new();
    let read = reader.read_to_end(&mut output);
    // Reap the child even if reading failed.
    let status = child.wait();

    read.map_err(|source| io_error(command, source))?;
    let status = status.map_err(|source| io_error(command, source))?;
    Ok((exit_code(status, command), Some(output)))
}

fn spawn_error(command: &[String], source: io::Error) -> ShError {
    ShError::Spawn {
        command: command.to_vec(),
        source,
    }
}

fn io_error(command: &[String], source: io::Error) -> ShError {
    ShError::Io {
        command: command.to_vec(),
        source,
    }
}

fn exit_code(status: ExitStatus, command: &[String]) -> i32 {
    let code = status
        .code()
        .unwrap_or_else(|| terminated_by_signal(status));
    tracing::debug!(?command, code, "process exited");
    code
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
        128 + signal
    } else if status.core_dumped() {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> i32 {
    -1
}

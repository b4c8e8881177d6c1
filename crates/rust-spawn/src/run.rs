//! Convenience wrappers composed from [`Process`](crate::Process) primitives.
//!
//! These mirror the usual "call and check" helpers: run to completion and
//! return the code, fail on a non-zero code, or capture stdout.

use crate::command::Command;
use crate::config::{LaunchOptions, StdioMode};
use crate::error::{LaunchError, Result};
use crate::traits::{Launcher, StreamData};

/// Run `command` to completion and return its return code.
pub fn call(
    launcher: &dyn Launcher,
    command: impl Into<Command>,
    options: &LaunchOptions,
) -> Result<i32> {
    let command = command.into();
    let mut process = launcher.launch(&command, options)?;
    process.wait(None)
}

/// Run `command` to completion, failing if it returns a non-zero code.
pub fn check_call(
    launcher: &dyn Launcher,
    command: impl Into<Command>,
    options: &LaunchOptions,
) -> Result<()> {
    let command = command.into();
    let returncode = call(launcher, &command, options)?;
    if returncode != 0 {
        return Err(LaunchError::called_process(command, returncode, None));
    }
    Ok(())
}

/// Run `command` with piped stdout and return what it wrote.
///
/// Fails if the command returns a non-zero code. A process that wrote nothing
/// yields empty data rather than `None`.
pub fn check_output(
    launcher: &dyn Launcher,
    command: impl Into<Command>,
    options: &LaunchOptions,
) -> Result<StreamData> {
    let command = command.into();
    let mut options = options.clone();
    options.stdout = StdioMode::Piped;

    let mut process = launcher.launch(&command, &options)?;
    let captured = process.communicate(None, None)?;
    let returncode = process.wait(None)?;
    if returncode != 0 {
        tracing::debug!(command = %command, returncode, "check_output failed");
        return Err(LaunchError::called_process(
            command,
            returncode,
            captured.stdout,
        ));
    }

    Ok(captured
        .stdout
        .unwrap_or_else(|| StreamData::empty(options.text_mode)))
}

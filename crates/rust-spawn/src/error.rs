//! Error types for the rust-spawn crate.
//!
//! [`LaunchError`] mirrors the failures a real process handle reports, so test
//! code can assert on a fake process the same way it would on a real one.

use std::io;
use std::time::Duration;

use crate::command::Command;
use crate::traits::StreamData;

/// The error type for launch and process operations.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// Waiting for the process exceeded the requested timeout.
    #[error("command '{command}' timed out after {timeout:?}")]
    Timeout {
        /// The command that was waited on.
        command: Command,
        /// The timeout the caller requested.
        timeout: Duration,
    },

    /// The process exited with a non-zero return code.
    #[error("command '{command}' returned non-zero exit status {returncode}")]
    CalledProcess {
        /// The command that failed.
        command: Command,
        /// Its return code.
        returncode: i32,
        /// Captured stdout, when the caller asked for it.
        stdout: Option<StreamData>,
    },

    /// The launcher could not start the process.
    #[error("failed to spawn process: {0}")]
    Spawn(#[source] io::Error),
}

/// A specialized Result type for launch operations.
pub type Result<T> = std::result::Result<T, LaunchError>;

impl LaunchError {
    /// Create a timeout error.
    pub fn timeout(command: impl Into<Command>, timeout: Duration) -> Self {
        Self::Timeout {
            command: command.into(),
            timeout,
        }
    }

    /// Create a non-zero exit error.
    pub fn called_process(
        command: impl Into<Command>,
        returncode: i32,
        stdout: Option<StreamData>,
    ) -> Self {
        Self::CalledProcess {
            command: command.into(),
            returncode,
            stdout,
        }
    }

    /// Check if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The command this error concerns, if known.
    #[must_use]
    pub const fn command(&self) -> Option<&Command> {
        match self {
            Self::Timeout { command, .. } | Self::CalledProcess { command, .. } => Some(command),
            Self::Spawn(_) => None,
        }
    }

    /// The return code of a failed process.
    #[must_use]
    pub const fn returncode(&self) -> Option<i32> {
        match self {
            Self::CalledProcess { returncode, .. } => Some(*returncode),
            _ => None,
        }
    }
}

//! Core traits for the launch boundary.
//!
//! - [`Launcher`]: starts a process for a command and options.
//! - [`Process`]: handle for a started process.
//!
//! Production code depends on these traits rather than on a concrete
//! launcher, so tests can inject a double.

use std::fmt;
use std::io::Read;
use std::time::Duration;

use bytes::Bytes;

use crate::command::Command;
use crate::config::LaunchOptions;
use crate::error::Result;

/// Output captured from one standard stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamData {
    /// Decoded text (text mode).
    Text(String),
    /// Raw bytes (byte mode).
    Bytes(Bytes),
}

impl StreamData {
    /// Create text data.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create byte data.
    #[must_use]
    pub fn bytes(b: impl Into<Bytes>) -> Self {
        Self::Bytes(b.into())
    }

    /// Empty data in the requested mode.
    #[must_use]
    pub const fn empty(text_mode: bool) -> Self {
        if text_mode {
            Self::Text(String::new())
        } else {
            Self::Bytes(Bytes::new())
        }
    }

    /// View the data as bytes, whatever the mode.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Bytes(b) => b,
        }
    }

    /// Get the data as text, if it was captured in text mode.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bytes(_) => None,
        }
    }

    /// Check if the data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Output of [`Process::communicate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    /// Captured standard output.
    pub stdout: Option<StreamData>,
    /// Captured standard error.
    pub stderr: Option<StreamData>,
}

/// Handle for a started process.
///
/// The operations mirror a live process handle: non-blocking polling,
/// blocking wait with an optional timeout, and output retrieval.
pub trait Process: fmt::Debug + Send {
    /// The command this process was started with.
    fn command(&self) -> &Command;

    /// Get the return code without blocking.
    ///
    /// Returns `None` while the process is still running.
    fn poll(&mut self) -> Result<Option<i32>>;

    /// Wait for the process to exit and return its return code.
    ///
    /// Fails with [`LaunchError::Timeout`](crate::LaunchError::Timeout) when
    /// `timeout` elapses first.
    fn wait(&mut self, timeout: Option<Duration>) -> Result<i32>;

    /// Feed `input` to stdin, then collect stdout and stderr.
    fn communicate(&mut self, input: Option<&[u8]>, timeout: Option<Duration>)
    -> Result<Captured>;

    /// Kill the process.
    fn kill(&mut self) -> Result<()>;

    /// Take the stdout pipe, if stdout was piped and not taken yet.
    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>>;

    /// Take the stderr pipe, if stderr was piped and not taken yet.
    fn take_stderr(&mut self) -> Option<Box<dyn Read + Send>>;
}

/// Starts processes.
///
/// This is the substitution point: code that launches processes takes a
/// `&dyn Launcher` (or a [`LaunchSlot`](crate::LaunchSlot)), and tests supply
/// a fake.
pub trait Launcher: Send + Sync {
    /// Start a process for `command` with `options`.
    fn launch(&self, command: &Command, options: &LaunchOptions) -> Result<Box<dyn Process>>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn launch(&self, command: &Command, options: &LaunchOptions) -> Result<Box<dyn Process>> {
        (**self).launch(command, options)
    }
}

impl<L: Launcher + ?Sized> Launcher for std::sync::Arc<L> {
    fn launch(&self, command: &Command, options: &LaunchOptions) -> Result<Box<dyn Process>> {
        (**self).launch(command, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_data_views() {
        let text = StreamData::text("X");
        assert_eq!(text.as_bytes(), b"X");
        assert_eq!(text.as_text(), Some("X"));

        let bytes = StreamData::bytes(&b"Y"[..]);
        assert_eq!(bytes.as_bytes(), b"Y");
        assert_eq!(bytes.as_text(), None);
    }

    #[test]
    fn empty_follows_mode() {
        assert_eq!(StreamData::empty(true), StreamData::Text(String::new()));
        assert_eq!(StreamData::empty(false), StreamData::Bytes(Bytes::new()));
        assert!(StreamData::empty(false).is_empty());
    }
}

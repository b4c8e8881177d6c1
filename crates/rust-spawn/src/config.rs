//! Launch options.
//!
//! This module provides [`LaunchOptions`], the explicit set of options that
//! accompany every invocation request, and [`StdioMode`] for the standard
//! stream dispositions.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Disposition of one of the child's standard streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Share the parent's stream.
    #[default]
    Inherit,
    /// Connect the stream to a pipe readable or writable by the caller.
    Piped,
    /// Discard the stream.
    Null,
}

impl StdioMode {
    /// Check if this stream is piped.
    #[must_use]
    pub const fn is_piped(self) -> bool {
        matches!(self, Self::Piped)
    }
}

/// Options for launching a process.
///
/// Only the fields below carry meaning. Anything else a caller wants to pass
/// goes into [`extra`](Self::extra), which launchers accept and ignore.
///
/// # Example
///
/// ```
/// use rust_spawn::{LaunchOptions, StdioMode};
///
/// let options = LaunchOptions::builder()
///     .text_mode(true)
///     .stdout(StdioMode::Piped)
///     .working_directory("/tmp")
///     .env("LANG", "C")
///     .build();
///
/// assert!(options.text_mode);
/// assert!(options.stdout.is_piped());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Decode captured output as text instead of returning raw bytes.
    pub text_mode: bool,

    /// Standard input disposition.
    pub stdin: StdioMode,

    /// Standard output disposition.
    pub stdout: StdioMode,

    /// Standard error disposition.
    pub stderr: StdioMode,

    /// Working directory for the child process.
    pub working_directory: Option<PathBuf>,

    /// Environment variables to add for the child process.
    pub env: HashMap<String, String>,

    /// Unrecognized options. Accepted structurally, never interpreted.
    pub extra: BTreeMap<String, String>,
}

impl LaunchOptions {
    /// Create a new builder for `LaunchOptions`.
    #[must_use]
    pub fn builder() -> LaunchOptionsBuilder {
        LaunchOptionsBuilder::new()
    }

    /// Create options with default settings (byte mode, inherited streams).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options requesting text-mode output.
    #[must_use]
    pub fn text() -> Self {
        Self {
            text_mode: true,
            ..Self::default()
        }
    }

    /// Options requesting piped stdout and stderr.
    #[must_use]
    pub fn piped() -> Self {
        Self {
            stdout: StdioMode::Piped,
            stderr: StdioMode::Piped,
            ..Self::default()
        }
    }
}

/// Builder for [`LaunchOptions`].
#[derive(Debug, Clone, Default)]
pub struct LaunchOptionsBuilder {
    options: LaunchOptions,
}

impl LaunchOptionsBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text mode.
    #[must_use]
    pub const fn text_mode(mut self, value: bool) -> Self {
        self.options.text_mode = value;
        self
    }

    /// Set the stdin disposition.
    #[must_use]
    pub const fn stdin(mut self, mode: StdioMode) -> Self {
        self.options.stdin = mode;
        self
    }

    /// Set the stdout disposition.
    #[must_use]
    pub const fn stdout(mut self, mode: StdioMode) -> Self {
        self.options.stdout = mode;
        self
    }

    /// Set the stderr disposition.
    #[must_use]
    pub const fn stderr(mut self, mode: StdioMode) -> Self {
        self.options.stderr = mode;
        self
    }

    /// Set the working directory for the child process.
    #[must_use]
    pub fn working_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.working_directory = Some(path.into());
        self
    }

    /// Add an environment variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.env.insert(key.into(), value.into());
        self
    }

    /// Record an option that has no modeled meaning.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.extra.insert(key.into(), value.into());
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> LaunchOptions {
        self.options
    }
}

//! Error types for rust-spawn-mock.
//!
//! Every failure here is meant to fail a test loudly. The unexpected-invocation
//! message in particular carries everything needed to fix the test: the
//! command, what was declared, and a line to paste.

use std::path::Path;

use thiserror::Error;

use crate::{Command, LaunchError};

/// Format the message for a command no expectation matched.
fn format_unexpected_invocation(
    command: &Command,
    declared: &[String],
    omitted: usize,
    hint: &str,
) -> String {
    let mut listing = if declared.is_empty() {
        "  (no expectations declared)".to_string()
    } else {
        declared
            .iter()
            .enumerate()
            .map(|(i, line)| format!("  [{i}] {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    if omitted > 0 {
        listing.push_str(&format!("\n  ... ({omitted} more)"));
    }

    format!(
        "Unexpected process spawned: '{command}'\n\
         \n\
         Declared expectations:\n\
         {listing}\n\
         \n\
         Try `{hint}`"
    )
}

/// The main error type for rust-spawn-mock operations.
#[derive(Debug, Error)]
pub enum MockError {
    /// A command was spawned that no expectation matches.
    #[error("{}", format_unexpected_invocation(command, declared, *omitted, hint))]
    UnexpectedInvocation {
        /// The command that was spawned.
        command: Command,
        /// One line per declared expectation, in declaration order.
        declared: Vec<String>,
        /// Number of declared expectations left out of `declared`.
        omitted: usize,
        /// A ready-to-paste declaration that would match.
        hint: String,
    },

    /// An expectation declared both a side effect and canned output.
    #[error(
        "expectation for {} sets both a side effect and canned stdout/stderr",
        pattern.literal()
    )]
    ConflictingExpectation {
        /// The offending pattern.
        pattern: Command,
    },

    /// An expectation was never used.
    #[error("expectation [{}] {} was never invoked", index, pattern.literal())]
    Unverified {
        /// Position in declaration order.
        index: usize,
        /// Its pattern.
        pattern: Command,
    },

    /// A fixture file is malformed.
    #[error("invalid fixture: {message}")]
    Fixture {
        /// Description of the problem.
        message: String,
    },

    /// An I/O error occurred with additional context.
    #[error("{context}: {source}")]
    Io {
        /// What operation was being performed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A TOML fixture failed to parse.
    #[error("TOML fixture error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON fixture failed to parse.
    #[error("JSON fixture error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error from the fake process.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Result type alias for rust-spawn-mock operations.
pub type Result<T> = std::result::Result<T, MockError>;

impl MockError {
    /// Create an unexpected-invocation error.
    pub fn unexpected_invocation(
        command: Command,
        declared: Vec<String>,
        omitted: usize,
        hint: impl Into<String>,
    ) -> Self {
        Self::UnexpectedInvocation {
            command,
            declared,
            omitted,
            hint: hint.into(),
        }
    }

    /// Create a conflicting-expectation error.
    #[must_use]
    pub const fn conflicting_expectation(pattern: Command) -> Self {
        Self::ConflictingExpectation { pattern }
    }

    /// Create an unverified-expectation error.
    #[must_use]
    pub const fn unverified(index: usize, pattern: Command) -> Self {
        Self::Unverified { index, pattern }
    }

    /// Create a fixture error.
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture {
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io_context(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an I/O error for reading `path`.
    pub(crate) fn reading(path: &Path, source: std::io::Error) -> Self {
        Self::io_context(format!("reading fixture {}", path.display()), source)
    }

    /// Check if this is an unexpected-invocation error.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self, Self::UnexpectedInvocation { .. })
    }

    /// The command this error concerns, if any.
    #[must_use]
    pub const fn command(&self) -> Option<&Command> {
        match self {
            Self::UnexpectedInvocation { command, .. } => Some(command),
            Self::ConflictingExpectation { pattern } | Self::Unverified { pattern, .. } => {
                Some(pattern)
            }
            Self::Launch(err) => err.command(),
            _ => None,
        }
    }
}

//! Declared expectations.
//!
//! An [`Expectation`] pairs a command pattern with what a process spawned for
//! a matching command should report: canned stdout/stderr, a return code and a
//! nominal duration, or a side effect that computes the result per call.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::Command;
use crate::error::{MockError, Result};
use crate::side_effect::{Invocation, Outcome, SideEffect, SideEffectFn};

/// A test-declared rule for one kind of invocation.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rust_spawn_mock::Expectation;
///
/// let e = Expectation::new(["ls", "-l"])
///     .stdout("total 0\n")
///     .returncode(0)
///     .duration(Duration::from_secs(2));
/// assert_eq!(e.canned_stdout(), Some("total 0\n"));
/// ```
#[derive(Clone)]
pub struct Expectation {
    pattern: Command,
    stdout: Option<String>,
    stderr: Option<String>,
    returncode: i32,
    duration: Duration,
    side_effect: Option<SideEffect>,
}

impl Expectation {
    /// Create an expectation for `pattern` that exits 0 instantly with no output.
    #[must_use]
    pub fn new(pattern: impl Into<Command>) -> Self {
        Self {
            pattern: pattern.into(),
            stdout: None,
            stderr: None,
            returncode: 0,
            duration: Duration::ZERO,
            side_effect: None,
        }
    }

    /// Set the canned stdout.
    #[must_use]
    pub fn stdout(mut self, text: impl Into<String>) -> Self {
        self.stdout = Some(text.into());
        self
    }

    /// Set the canned stderr.
    #[must_use]
    pub fn stderr(mut self, text: impl Into<String>) -> Self {
        self.stderr = Some(text.into());
        self
    }

    /// Set the canned return code.
    #[must_use]
    pub const fn returncode(mut self, code: i32) -> Self {
        self.returncode = code;
        self
    }

    /// Set how long the process nominally runs. Only `wait` timeouts look at it.
    #[must_use]
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Compute the result with `f` instead of canned output.
    ///
    /// Cannot be combined with [`stdout`](Self::stdout) or
    /// [`stderr`](Self::stderr); registering such an expectation fails.
    #[must_use]
    pub fn side_effect<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Outcome + Send + Sync + 'static,
    {
        self.side_effect = Some(Arc::new(f));
        self
    }

    /// The command pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Command {
        &self.pattern
    }

    /// The canned stdout.
    #[must_use]
    pub fn canned_stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }

    /// The canned stderr.
    #[must_use]
    pub fn canned_stderr(&self) -> Option<&str> {
        self.stderr.as_deref()
    }

    /// The canned return code.
    #[must_use]
    pub const fn canned_returncode(&self) -> i32 {
        self.returncode
    }

    /// The declared duration.
    #[must_use]
    pub const fn canned_duration(&self) -> Duration {
        self.duration
    }

    /// Check if a side effect computes this expectation's result.
    #[must_use]
    pub const fn has_side_effect(&self) -> bool {
        self.side_effect.is_some()
    }

    pub(crate) fn side_effect_fn(&self) -> Option<&SideEffectFn> {
        self.side_effect.as_deref()
    }

    /// Reject declarations that mix a side effect with canned output.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.has_side_effect() && (self.stdout.is_some() || self.stderr.is_some()) {
            return Err(MockError::conflicting_expectation(self.pattern.clone()));
        }
        Ok(())
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("pattern", &self.pattern)
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("returncode", &self.returncode)
            .field("duration", &self.duration)
            .field("side_effect", &self.side_effect.is_some())
            .finish()
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern.literal())?;
        if self.has_side_effect() {
            write!(f, " -> side effect")
        } else {
            write!(f, " -> returncode {}", self.returncode)
        }
    }
}

//! Side effects: expectations whose result is computed per invocation.
//!
//! A side effect is a plain function from the [`Invocation`] to an
//! [`Outcome`]. It runs synchronously, exactly once for every process spawned
//! from its expectation, and its outcome replaces the canned values.

use std::sync::Arc;

use crate::expectation::Expectation;
use crate::{Command, LaunchOptions};

/// A side-effect callback.
pub type SideEffectFn = dyn Fn(&Invocation<'_>) -> Outcome + Send + Sync;

/// Shared handle to a side-effect callback.
pub type SideEffect = Arc<SideEffectFn>;

/// What a side effect gets to see about the request it answers.
///
/// The side effect runs at spawn time, before any `communicate` input exists,
/// so it never sees stdin.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// The command being spawned.
    pub command: &'a Command,
    /// The options it was spawned with.
    pub options: &'a LaunchOptions,
}

impl<'a> Invocation<'a> {
    /// Create an invocation view.
    #[must_use]
    pub const fn new(command: &'a Command, options: &'a LaunchOptions) -> Self {
        Self { command, options }
    }

    /// The command's tokens (a shell line is one token).
    #[must_use]
    pub fn argv(&self) -> &'a [String] {
        self.command.tokens()
    }

    /// Get a token by index.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.argv().get(index).map(String::as_str)
    }
}

/// The result a side effect produces.
///
/// # Example
///
/// ```
/// use rust_spawn_mock::Outcome;
///
/// let outcome = Outcome::success().println("OH HI THERE!");
/// assert_eq!(outcome.stdout_text(), "OH HI THERE!\n");
/// assert_eq!(outcome.code(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    returncode: i32,
    stdout: String,
    stderr: String,
}

impl Outcome {
    /// An outcome with the given return code and no output.
    #[must_use]
    pub const fn exit(returncode: i32) -> Self {
        Self {
            returncode,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A successful outcome with no output.
    #[must_use]
    pub const fn success() -> Self {
        Self::exit(0)
    }

    /// Append text to stdout.
    #[must_use]
    pub fn stdout(mut self, text: impl AsRef<str>) -> Self {
        self.stdout.push_str(text.as_ref());
        self
    }

    /// Append text to stderr.
    #[must_use]
    pub fn stderr(mut self, text: impl AsRef<str>) -> Self {
        self.stderr.push_str(text.as_ref());
        self
    }

    /// Append a line to stdout.
    #[must_use]
    pub fn println(self, line: impl AsRef<str>) -> Self {
        self.stdout(line).stdout("\n")
    }

    /// Append a line to stderr.
    #[must_use]
    pub fn eprintln(self, line: impl AsRef<str>) -> Self {
        self.stderr(line).stderr("\n")
    }

    /// Set the return code.
    #[must_use]
    pub const fn with_code(mut self, returncode: i32) -> Self {
        self.returncode = returncode;
        self
    }

    /// The return code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.returncode
    }

    /// Text written to stdout.
    #[must_use]
    pub fn stdout_text(&self) -> &str {
        &self.stdout
    }

    /// Text written to stderr.
    #[must_use]
    pub fn stderr_text(&self) -> &str {
        &self.stderr
    }
}

/// The effective result for one spawned process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub returncode: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// Work out what the process spawned for `invocation` reports.
///
/// Canned expectations are copied. A side effect is called once and its
/// captured text is always present, even when empty.
pub(crate) fn resolve(expectation: &Expectation, invocation: &Invocation<'_>) -> Resolved {
    match expectation.side_effect_fn() {
        Some(side_effect) => {
            let outcome = side_effect(invocation);
            tracing::trace!(
                command = %invocation.command,
                returncode = outcome.returncode,
                stdout_len = outcome.stdout.len(),
                stderr_len = outcome.stderr.len(),
                "side effect ran"
            );
            Resolved {
                returncode: outcome.returncode,
                stdout: Some(outcome.stdout),
                stderr: Some(outcome.stderr),
            }
        }
        None => Resolved {
            returncode: expectation.canned_returncode(),
            stdout: expectation.canned_stdout().map(str::to_string),
            stderr: expectation.canned_stderr().map(str::to_string),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn canned_values_are_copied() {
        let expectation = Expectation::new(["ls"]).stdout("X").returncode(3);
        let command = Command::from(["ls"]);
        let options = LaunchOptions::default();
        let resolved = resolve(&expectation, &Invocation::new(&command, &options));
        assert_eq!(
            resolved,
            Resolved {
                returncode: 3,
                stdout: Some("X".to_string()),
                stderr: None,
            }
        );
    }

    #[test]
    fn side_effect_sees_argv() {
        let expectation = Expectation::new(["foo", "--lol"])
            .side_effect(|inv| Outcome::success().println(inv.arg(1).unwrap_or_default()));
        let command = Command::from(["foo", "--lol"]);
        let options = LaunchOptions::default();
        let resolved = resolve(&expectation, &Invocation::new(&command, &options));
        assert_eq!(resolved.stdout.as_deref(), Some("--lol\n"));
        assert_eq!(resolved.stderr.as_deref(), Some(""));
    }

    #[test]
    fn side_effect_runs_once_per_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let expectation = Expectation::new("foo").side_effect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Outcome::exit(17)
        });
        let command = Command::from("foo");
        let options = LaunchOptions::default();

        let resolved = resolve(&expectation, &Invocation::new(&command, &options));
        assert_eq!(resolved.returncode, 17);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let _ = resolve(&expectation, &Invocation::new(&command, &options));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn outcome_builders() {
        let outcome = Outcome::exit(1).stdout("a").eprintln("oops").with_code(2);
        assert_eq!(outcome.code(), 2);
        assert_eq!(outcome.stdout_text(), "a");
        assert_eq!(outcome.stderr_text(), "oops\n");
    }
}

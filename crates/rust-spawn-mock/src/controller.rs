//! The interception controller.
//!
//! [`SpawnMock`] holds the expectation registry and implements
//! [`Launcher`]. Activating it on a [`LaunchSlot`] swaps it in for whatever
//! launcher the slot held; the returned [`MockGuard`] puts the original back
//! when it goes out of scope, including when a test panics.

use std::ops::Deref;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::MockConfig;
use crate::error::{MockError, Result};
use crate::expectation::Expectation;
use crate::fixtures::ExpectationFile;
use crate::process::FakeProcess;
use crate::registry::{ExpectationSummary, Registry};
use crate::side_effect::{self, Invocation};
use crate::{Command, LaunchOptions, LaunchSlot, Launcher, Process};

#[derive(Debug, Default)]
struct Shared {
    registry: Mutex<Registry>,
    config: MockConfig,
    active: AtomicBool,
}

/// Expectation-driven stand-in for a process launcher.
///
/// Clones share the same registry, so a clone installed in a slot and the
/// handle kept by the test observe the same invoke counts.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rust_spawn::{LaunchSlot, run};
/// use rust_spawn_mock::{Expectation, SpawnMock};
/// # use rust_spawn::{Command, LaunchOptions, Launcher, Process};
/// # struct Unused;
/// # impl Launcher for Unused {
/// #     fn launch(&self, _: &Command, _: &LaunchOptions) -> rust_spawn::Result<Box<dyn Process>> {
/// #         unreachable!()
/// #     }
/// # }
///
/// let slot = LaunchSlot::new(Arc::new(Unused));
/// let mock = SpawnMock::new();
/// mock.expect(Expectation::new(["ls", "-l"]).returncode(3)).unwrap();
///
/// let guard = mock.activate(&slot);
/// assert_eq!(run::call(&slot, ["ls", "-l"], &Default::default()).unwrap(), 3);
/// drop(guard);
///
/// mock.verify().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpawnMock {
    inner: Arc<Shared>,
}

impl SpawnMock {
    /// Create a mock with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            inner: Arc::new(Shared {
                config,
                ..Shared::default()
            }),
        }
    }

    /// Create a mock configured from `SPAWN_MOCK_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_config(MockConfig::from_env())
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &MockConfig {
        &self.inner.config
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an expectation. Returns its index.
    ///
    /// Order matters: the first declared expectation that matches a command
    /// handles it.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::ConflictingExpectation`] if the expectation has
    /// both a side effect and canned stdout or stderr.
    pub fn expect(&self, expectation: Expectation) -> Result<usize> {
        expectation.validate()?;
        tracing::debug!(expectation = %expectation, "declared expectation");
        Ok(self.registry().push(expectation))
    }

    /// Register every expectation in a fixture file. Returns how many.
    ///
    /// Relative paths are resolved against the configured fixture root.
    /// Nothing is registered if any entry is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn expect_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = self.inner.config.fixture_path(path.as_ref());
        let expectations = ExpectationFile::load(&path)?.into_expectations()?;
        let count = expectations.len();

        let mut registry = self.registry();
        for expectation in expectations {
            tracing::debug!(expectation = %expectation, "declared expectation");
            registry.push(expectation);
        }
        Ok(count)
    }

    /// Install this mock in `slot` until the returned guard is dropped.
    ///
    /// Expectations declared before activation are kept, and more can be
    /// declared through the guard.
    pub fn activate<'a>(&self, slot: &'a LaunchSlot) -> MockGuard<'a> {
        if self.inner.active.swap(true, Ordering::SeqCst) {
            tracing::warn!("mock activated while already active");
        }
        let original = slot.replace(Arc::new(self.clone()));
        tracing::debug!(expectations = self.len(), "mock activated");
        MockGuard {
            slot,
            original,
            mock: self.clone(),
        }
    }

    /// Check if the mock is installed in a slot.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Number of declared expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry().len()
    }

    /// Check if nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }

    /// How many processes the expectation at `index` has produced.
    #[must_use]
    pub fn invoke_count(&self, index: usize) -> Option<usize> {
        self.registry().invoke_count(index)
    }

    /// Snapshot the declared expectations.
    #[must_use]
    pub fn expectations(&self) -> Vec<ExpectationSummary> {
        self.registry().summaries()
    }

    /// Check that every declared expectation was used at least once.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Unverified`] naming the first unused expectation.
    pub fn verify(&self) -> Result<()> {
        match self.registry().first_unused() {
            Some((index, expectation)) => {
                Err(MockError::unverified(index, expectation.pattern().clone()))
            }
            None => Ok(()),
        }
    }

    /// Spawn a fake process for `command`.
    ///
    /// The matched expectation's side effect, if any, runs here, after the
    /// registry lock is released.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedInvocation`] if no expectation matches.
    pub fn try_spawn(&self, command: &Command, options: &LaunchOptions) -> Result<FakeProcess> {
        let matched = self.registry().consume(command);
        let Some((index, expectation)) = matched else {
            return Err(self.unexpected(command));
        };
        tracing::trace!(command = %command, index, "matched expectation");

        let invocation = Invocation::new(command, options);
        let resolved = side_effect::resolve(&expectation, &invocation);
        Ok(FakeProcess::new(
            command.clone(),
            options,
            resolved,
            expectation.canned_duration(),
        ))
    }

    fn unexpected(&self, command: &Command) -> MockError {
        let config = &self.inner.config;
        let (declared, omitted) = self.registry().describe(config.max_listed_expectations);
        let hint = format!(
            "{}.expect(Expectation::new({}))",
            config.hint_receiver,
            command.literal()
        );
        MockError::unexpected_invocation(command.clone(), declared, omitted, hint)
    }
}

impl Launcher for SpawnMock {
    /// # Panics
    ///
    /// Panics with the [`MockError::UnexpectedInvocation`] report if no
    /// expectation matches, failing the test that spawned the command.
    fn launch(
        &self,
        command: &Command,
        options: &LaunchOptions,
    ) -> rust_spawn::Result<Box<dyn Process>> {
        match self.try_spawn(command, options) {
            Ok(process) => Ok(Box::new(process)),
            Err(err) => {
                tracing::error!(command = %command, "unexpected process spawned");
                panic!("{err}");
            }
        }
    }
}

/// Scope of an active [`SpawnMock`].
///
/// Dereferences to the mock, so expectations can be declared and checked
/// through the guard. Dropping it restores the slot's original launcher.
#[must_use = "the mock is deactivated as soon as the guard is dropped"]
pub struct MockGuard<'a> {
    slot: &'a LaunchSlot,
    original: Arc<dyn Launcher>,
    mock: SpawnMock,
}

impl MockGuard<'_> {
    /// The launcher the slot held before activation.
    #[must_use]
    pub fn original(&self) -> &Arc<dyn Launcher> {
        &self.original
    }

    /// The active mock.
    #[must_use]
    pub const fn mock(&self) -> &SpawnMock {
        &self.mock
    }

    /// Restore the original launcher now. Returns the mock for later checks.
    #[must_use]
    pub fn deactivate(self) -> SpawnMock {
        self.mock.clone()
    }
}

impl Deref for MockGuard<'_> {
    type Target = SpawnMock;

    fn deref(&self) -> &SpawnMock {
        &self.mock
    }
}

impl std::fmt::Debug for MockGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGuard")
            .field("slot", &self.slot)
            .field("mock", &self.mock)
            .finish_non_exhaustive()
    }
}

impl Drop for MockGuard<'_> {
    fn drop(&mut self) {
        self.slot.replace(Arc::clone(&self.original));
        self.mock.inner.active.store(false, Ordering::SeqCst);
        tracing::debug!("mock deactivated");
    }
}

/// Create a fresh mock and activate it on `slot`.
pub fn patch_launcher(slot: &LaunchSlot) -> MockGuard<'_> {
    SpawnMock::new().activate(slot)
}

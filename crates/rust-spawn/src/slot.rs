//! The launcher substitution point.
//!
//! A [`LaunchSlot`] holds the launcher that production code uses. Tests swap
//! it for a fake and put the original back afterwards.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::command::Command;
use crate::config::LaunchOptions;
use crate::error::Result;
use crate::traits::{Launcher, Process};

/// Holder of the current launcher.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use rust_spawn::{LaunchOptions, LaunchSlot, run};
///
/// fn list(slot: &LaunchSlot) -> rust_spawn::Result<()> {
///     run::check_call(slot, ["ls", "-l"], &LaunchOptions::default())
/// }
/// ```
pub struct LaunchSlot {
    current: RwLock<Arc<dyn Launcher>>,
}

impl LaunchSlot {
    /// Create a slot holding `launcher`.
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self {
            current: RwLock::new(launcher),
        }
    }

    /// The launcher currently installed.
    #[must_use]
    pub fn current(&self) -> Arc<dyn Launcher> {
        let current = self
            .current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Install `launcher` and return the one it replaces.
    pub fn replace(&self, launcher: Arc<dyn Launcher>) -> Arc<dyn Launcher> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        tracing::trace!("replacing launcher");
        std::mem::replace(&mut *current, launcher)
    }

    /// Check whether `launcher` is the one currently installed.
    #[must_use]
    pub fn is_current(&self, launcher: &Arc<dyn Launcher>) -> bool {
        Arc::ptr_eq(&self.current(), launcher)
    }
}

impl Launcher for LaunchSlot {
    fn launch(&self, command: &Command, options: &LaunchOptions) -> Result<Box<dyn Process>> {
        // Clone out of the lock so a panicking launcher cannot poison the slot.
        let launcher = self.current();
        launcher.launch(command, options)
    }
}

impl fmt::Debug for LaunchSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchSlot").finish_non_exhaustive()
    }
}

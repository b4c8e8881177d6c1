//! Convenient re-exports for common rust-spawn-mock usage.
//!
//! ```
//! use rust_spawn_mock::prelude::*;
//!
//! let mock = SpawnMock::new();
//! mock.expect(Expectation::new(["git", "status"])).unwrap();
//! assert!(mock.verify().is_err());
//! ```

// Controller
pub use crate::controller::{MockGuard, SpawnMock, patch_launcher};

// Declarations
pub use crate::expectation::Expectation;
pub use crate::side_effect::{Invocation, Outcome};

// Error handling
pub use crate::error::{MockError, Result};

// Launch boundary
pub use crate::{
    Captured, Command, LaunchOptions, LaunchSlot, Launcher, Process, StdioMode, StreamData,
};

// Macros
pub use crate::pattern;

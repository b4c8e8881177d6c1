//! rust-spawn-mock: Expectation-driven process test double
//!
//! Tests declare which external commands the code under test may start and
//! what each one should report. While a [`SpawnMock`] is active on a
//! [`LaunchSlot`], every launch is answered by a [`FakeProcess`] built from the
//! first matching [`Expectation`]. A launch nothing matches fails the test on
//! the spot, with a report of what was declared and a line to paste.
//!
//! # Features
//!
//! - **Prefix-regex patterns**: each declared token is matched as an anchored
//!   regex against the actual token
//! - **Canned or computed results**: fixed stdout/stderr/return code, or a
//!   side effect that sees the invocation
//! - **Timeout simulation**: a declared duration makes `wait` time out
//!   without sleeping
//! - **Fixture files**: expectations in TOML or JSON
//! - **Compile-time patterns**: [`pattern!`] rejects invalid regex tokens
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_spawn_mock::prelude::*;
//! # struct Unused;
//! # impl Launcher for Unused {
//! #     fn launch(&self, _: &Command, _: &LaunchOptions) -> rust_spawn::Result<Box<dyn Process>> {
//! #         unreachable!()
//! #     }
//! # }
//!
//! let slot = LaunchSlot::new(Arc::new(Unused));
//! let mock = patch_launcher(&slot);
//! mock.expect(Expectation::new(["ls", "-l"]).stdout("FOOBAR")).unwrap();
//!
//! let out = rust_spawn::run::check_output(&slot, ["ls", "-l"], &LaunchOptions::default()).unwrap();
//! assert_eq!(out.as_bytes(), b"FOOBAR");
//! mock.verify().unwrap();
//! ```

// Re-export macros
pub use rust_spawn_macros::pattern;

pub mod config;
pub mod controller;
pub mod error;
pub mod expectation;
pub mod fixtures;
pub mod pattern;
pub mod prelude;
pub mod process;
pub mod registry;
pub mod side_effect;

// Launch boundary types
pub use rust_spawn::{
    Captured, Command, LaunchError, LaunchOptions, LaunchSlot, Launcher, Process, StdioMode,
    StreamData,
};

// Re-export primary types
pub use config::{EnvConfig, MockConfig, MockConfigBuilder};
pub use controller::{MockGuard, SpawnMock, patch_launcher};
pub use error::{MockError, Result};
pub use expectation::Expectation;
pub use fixtures::{ExpectationFile, FixtureFormat};
pub use pattern::CommandPattern;
pub use process::{FakeProcess, OutputPipe};
pub use registry::ExpectationSummary;
pub use side_effect::{Invocation, Outcome};

//! rust-spawn: Injectable process-launch boundary
//!
//! This crate defines the seam between code that starts external programs and
//! the thing that actually starts them. Code under test asks a [`Launcher`]
//! for a [`Process`] instead of reaching for a global entry point, so a test
//! can hand it a double (see `rust-spawn-mock`).
//!
//! # Quick Start
//!
//! ```ignore
//! use rust_spawn::{LaunchOptions, LaunchSlot, run};
//!
//! fn disk_usage(slot: &LaunchSlot) -> rust_spawn::Result<String> {
//!     let out = run::check_output(slot, ["du", "-sh", "."], &LaunchOptions::text())?;
//!     Ok(out.as_text().unwrap_or_default().to_string())
//! }
//! ```
//!
//! # Pieces
//!
//! - [`Command`]: argv tokens or a single shell line
//! - [`LaunchOptions`]: text mode, stream dispositions, ignored extras
//! - [`Launcher`] / [`Process`]: the traits a launcher and its handles implement
//! - [`LaunchSlot`]: swappable holder of the current launcher
//! - [`run`]: `call`, `check_call` and `check_output`

pub mod command;
pub mod config;
pub mod error;
pub mod run;
pub mod slot;
pub mod traits;

// Re-export primary types
pub use command::Command;
pub use config::{LaunchOptions, LaunchOptionsBuilder, StdioMode};
pub use error::{LaunchError, Result};
pub use slot::LaunchSlot;
pub use traits::{Captured, Launcher, Process, StreamData};

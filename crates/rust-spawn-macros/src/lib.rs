//! rust-spawn-macros: Procedural macros for rust-spawn-mock
//!
//! - [`pattern!`] - Command patterns whose regex tokens are checked at compile time
//!
//! # Example
//!
//! ```ignore
//! use rust_spawn_mock::{Expectation, pattern};
//!
//! let e = Expectation::new(pattern!(["git", "commit", "-m", ".+"]));
//! let shell = Expectation::new(pattern!("make .*"));
//! ```

// In proc-macro crates, passing parsed input by value is idiomatic
#![allow(clippy::needless_pass_by_value)]

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod pattern;

/// Build a command pattern, validating each token as a regex.
///
/// A bracketed list of string literals becomes an argument-vector pattern; a
/// single string literal becomes a shell-line pattern. Every token is checked
/// the way it will be matched, as a regex anchored at the start of the actual
/// token, and an invalid one is a compile error.
///
/// # Syntax
///
/// ```ignore
/// pattern!(["ls", "-l"])
/// pattern!(["foo", "--lol=.+"])
/// pattern!("echo .*")
/// ```
///
/// The expansion is a `rust_spawn_mock::Command`.
#[proc_macro]
pub fn pattern(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as pattern::PatternInput);
    pattern::expand(input).into()
}

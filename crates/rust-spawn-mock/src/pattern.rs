//! Command patterns.
//!
//! A [`CommandPattern`] decides whether an incoming command matches a declared
//! one. Matching is:
//!
//! 1. Argv patterns only match argv commands, shell lines only shell lines.
//! 2. Token counts must be equal.
//! 3. A command identical to the pattern matches.
//! 4. Otherwise every pattern token is a regular expression anchored at the
//!    *start* of the corresponding token. `--flag=.+` matches `--flag=YES`, and
//!    `--fl` matches `--flag=YES` too: this is a prefix match, not a full match.
//!
//! A token that is not a valid regular expression only matches itself.

use std::fmt;

use regex::Regex;

use crate::Command;

/// One compiled pattern token.
#[derive(Clone)]
enum TokenPattern {
    /// Regex anchored at the start of the token.
    Prefix(Regex),
    /// Token that did not compile as a regex.
    Literal(String),
}

impl TokenPattern {
    fn compile(token: &str) -> Self {
        match Regex::new(&format!("^(?:{token})")) {
            Ok(regex) => Self::Prefix(regex),
            Err(err) => {
                tracing::debug!(token, error = %err, "pattern token is not a regex; matching literally");
                Self::Literal(token.to_string())
            }
        }
    }

    fn matches(&self, token: &str) -> bool {
        match self {
            Self::Prefix(regex) => regex.is_match(token),
            Self::Literal(literal) => literal == token,
        }
    }
}

/// A compiled command pattern.
#[derive(Clone)]
pub struct CommandPattern {
    source: Command,
    tokens: Vec<TokenPattern>,
}

impl CommandPattern {
    /// Compile a pattern from a command.
    #[must_use]
    pub fn new(source: impl Into<Command>) -> Self {
        let source = source.into();
        let tokens = source
            .tokens()
            .iter()
            .map(|t| TokenPattern::compile(t))
            .collect();
        Self { source, tokens }
    }

    /// The command this pattern was compiled from.
    #[must_use]
    pub const fn source(&self) -> &Command {
        &self.source
    }

    /// Check if `command` matches this pattern.
    #[must_use]
    pub fn matches(&self, command: &Command) -> bool {
        if self.source.is_shell() != command.is_shell() {
            return false;
        }

        let incoming = command.tokens();
        if incoming.len() != self.tokens.len() {
            return false;
        }

        if self.source == *command {
            return true;
        }

        self.tokens
            .iter()
            .zip(incoming)
            .all(|(pattern, token)| pattern.matches(token))
    }
}

impl fmt::Debug for CommandPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandPattern({})", self.source.literal())
    }
}

impl From<Command> for CommandPattern {
    fn from(source: Command) -> Self {
        Self::new(source)
    }
}

//! Command representation.
//!
//! A [`Command`] describes how a process would be invoked: either as a program
//! name followed by its arguments, or as a single opaque shell line.

use std::fmt;

/// How a process is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Program name followed by its arguments.
    Argv(Vec<String>),

    /// A single opaque string, typically handed to a shell.
    Shell(String),
}

impl Command {
    /// Create an argv-style command.
    #[must_use]
    pub fn argv<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Argv(tokens.into_iter().map(Into::into).collect())
    }

    /// Create a shell-line command.
    #[must_use]
    pub fn shell(line: impl Into<String>) -> Self {
        Self::Shell(line.into())
    }

    /// The command's tokens. A shell line is exactly one token.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::Argv(tokens) => tokens,
            Self::Shell(line) => std::slice::from_ref(line),
        }
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens().len()
    }

    /// Check if the command has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    /// Check if this is a shell line.
    #[must_use]
    pub const fn is_shell(&self) -> bool {
        matches!(self, Self::Shell(_))
    }

    /// The program being invoked, if any.
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        self.tokens().first().map(String::as_str)
    }

    /// Render the command as a Rust literal that can be pasted back into a test.
    ///
    /// ```
    /// use rust_spawn::Command;
    ///
    /// assert_eq!(Command::from(["ls", "-l"]).literal(), r#"["ls", "-l"]"#);
    /// assert_eq!(Command::from("make all").literal(), r#""make all""#);
    /// ```
    #[must_use]
    pub fn literal(&self) -> String {
        match self {
            Self::Argv(tokens) => format!("{tokens:?}"),
            Self::Shell(line) => format!("{line:?}"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argv(tokens) => f.write_str(&tokens.join(" ")),
            Self::Shell(line) => f.write_str(line),
        }
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Self::Shell(line.to_string())
    }
}

impl From<String> for Command {
    fn from(line: String) -> Self {
        Self::Shell(line)
    }
}

impl From<Vec<String>> for Command {
    fn from(tokens: Vec<String>) -> Self {
        Self::Argv(tokens)
    }
}

impl From<Vec<&str>> for Command {
    fn from(tokens: Vec<&str>) -> Self {
        Self::argv(tokens)
    }
}

impl From<&[&str]> for Command {
    fn from(tokens: &[&str]) -> Self {
        Self::argv(tokens.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Command {
    fn from(tokens: [&str; N]) -> Self {
        Self::argv(tokens)
    }
}

impl From<&Self> for Command {
    fn from(command: &Self) -> Self {
        command.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_line_is_one_token() {
        let cmd = Command::from("ls -l | wc");
        assert_eq!(cmd.len(), 1);
        assert_eq!(cmd.tokens(), ["ls -l | wc"]);
        assert!(cmd.is_shell());
    }

    #[test]
    fn argv_display_joins_with_spaces() {
        let cmd = Command::from(["ls", "-l", "/tmp"]);
        assert_eq!(cmd.to_string(), "ls -l /tmp");
        assert_eq!(cmd.program(), Some("ls"));
    }

    #[test]
    fn literal_escapes_quotes() {
        let cmd = Command::from(["echo", "say \"hi\""]);
        assert_eq!(cmd.literal(), r#"["echo", "say \"hi\""]"#);
    }

    #[test]
    fn conversions_agree() {
        let a = Command::from(vec!["a", "b"]);
        let b = Command::from(["a", "b"]);
        let c = Command::from(vec!["a".to_string(), "b".to_string()]);
        let d = Command::from(&["a", "b"][..]);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c, d);
    }

    #[test]
    fn empty_argv() {
        let cmd = Command::argv(Vec::<String>::new());
        assert!(cmd.is_empty());
        assert_eq!(cmd.program(), None);
    }
}

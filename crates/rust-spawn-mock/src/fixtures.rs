//! Expectations loaded from fixture files.
//!
//! A fixture is a TOML or JSON document with a list of `expect` entries:
//!
//! ```toml
//! [[expect]]
//! command = ["ls", "-l"]
//! stdout = "total 0\n"
//! returncode = 0
//! duration_secs = 1.5
//!
//! [[expect]]
//! command = "make all"
//! ```
//!
//! A list is an argument vector, a string is a shell line. Side effects
//! cannot be expressed in a fixture.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::Command;
use crate::error::{MockError, Result};
use crate::expectation::Expectation;

/// Fixture file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl FixtureFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// The command of a fixture entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FixtureCommand {
    /// A shell line.
    Shell(String),
    /// An argument vector.
    Argv(Vec<String>),
}

impl From<FixtureCommand> for Command {
    fn from(command: FixtureCommand) -> Self {
        match command {
            FixtureCommand::Shell(line) => Self::Shell(line),
            FixtureCommand::Argv(tokens) => Self::Argv(tokens),
        }
    }
}

/// One `[[expect]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureEntry {
    /// Command pattern.
    pub command: FixtureCommand,
    /// Canned stdout.
    #[serde(default)]
    pub stdout: Option<String>,
    /// Canned stderr.
    #[serde(default)]
    pub stderr: Option<String>,
    /// Canned return code.
    #[serde(default)]
    pub returncode: i32,
    /// Nominal duration in seconds.
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

impl FixtureEntry {
    /// Convert into an expectation.
    pub fn into_expectation(self) -> Result<Expectation> {
        if matches!(&self.command, FixtureCommand::Argv(tokens) if tokens.is_empty()) {
            return Err(MockError::fixture("command list must not be empty"));
        }

        let mut expectation = Expectation::new(self.command).returncode(self.returncode);
        if let Some(stdout) = self.stdout {
            expectation = expectation.stdout(stdout);
        }
        if let Some(stderr) = self.stderr {
            expectation = expectation.stderr(stderr);
        }
        if let Some(secs) = self.duration_secs {
            let duration = Duration::try_from_secs_f64(secs)
                .map_err(|e| MockError::fixture(format!("duration_secs = {secs}: {e}")))?;
            expectation = expectation.duration(duration);
        }
        Ok(expectation)
    }
}

/// A parsed fixture document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectationFile {
    /// Entries in file order.
    #[serde(default)]
    pub expect: Vec<FixtureEntry>,
}

impl ExpectationFile {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse `content` in the given format.
    pub fn parse(content: &str, format: FixtureFormat) -> Result<Self> {
        match format {
            FixtureFormat::Toml => Self::from_toml_str(content),
            FixtureFormat::Json => Self::from_json_str(content),
        }
    }

    /// Read and parse a fixture file, detecting the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = FixtureFormat::from_path(path).ok_or_else(|| {
            MockError::fixture(format!(
                "cannot tell the format of {} (expected .toml or .json)",
                path.display()
            ))
        })?;
        let content = std::fs::read_to_string(path).map_err(|e| MockError::reading(path, e))?;
        tracing::debug!(path = %path.display(), ?format, "loading fixture");
        Self::parse(&content, format)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expect.len()
    }

    /// Check if the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expect.is_empty()
    }

    /// Convert every entry, in file order.
    pub fn into_expectations(self) -> Result<Vec<Expectation>> {
        self.expect
            .into_iter()
            .map(FixtureEntry::into_expectation)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LS_TOML: &str = r#"
[[expect]]
command = ["ls", "-l"]
stdout = "FOOBAR"
duration_secs = 1.5

[[expect]]
command = "make all"
returncode = 2
stderr = "no rule"
"#;

    #[test]
    fn toml_entries_in_order() {
        let file = ExpectationFile::from_toml_str(LS_TOML).unwrap();
        assert_eq!(file.len(), 2);

        let expectations = file.into_expectations().unwrap();
        assert_eq!(expectations[0].pattern(), &Command::from(["ls", "-l"]));
        assert_eq!(expectations[0].canned_stdout(), Some("FOOBAR"));
        assert_eq!(expectations[0].canned_duration(), Duration::from_millis(1500));
        assert_eq!(expectations[1].pattern(), &Command::shell("make all"));
        assert_eq!(expectations[1].canned_returncode(), 2);
        assert_eq!(expectations[1].canned_stderr(), Some("no rule"));
    }

    #[test]
    fn json_entries() {
        let file = ExpectationFile::from_json_str(
            r#"{"expect": [{"command": ["foo", "--lol"], "returncode": -1}]}"#,
        )
        .unwrap();
        let expectations = file.into_expectations().unwrap();
        assert_eq!(expectations[0].canned_returncode(), -1);
        assert!(expectations[0].canned_stdout().is_none());
    }

    #[test]
    fn negative_duration_rejected() {
        let file = ExpectationFile::from_toml_str(
            "[[expect]]\ncommand = [\"sleep\"]\nduration_secs = -1.0\n",
        )
        .unwrap();
        let err = file.into_expectations().unwrap_err();
        assert!(matches!(err, MockError::Fixture { .. }));
    }

    #[test]
    fn empty_command_rejected() {
        let file = ExpectationFile::from_toml_str("[[expect]]\ncommand = []\n").unwrap();
        assert!(file.into_expectations().is_err());
    }

    #[test]
    fn unknown_keys_rejected() {
        let err =
            ExpectationFile::from_toml_str("[[expect]]\ncommand = \"x\"\nside_effect = \"y\"\n")
                .unwrap_err();
        assert!(matches!(err, MockError::Toml(_)));
    }

    #[test]
    fn empty_document() {
        let file = ExpectationFile::from_toml_str("").unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn format_detection() {
        assert_eq!(
            FixtureFormat::from_path(Path::new("a/ls.TOML")),
            Some(FixtureFormat::Toml)
        );
        assert_eq!(
            FixtureFormat::from_path(Path::new("ls.json")),
            Some(FixtureFormat::Json)
        );
        assert_eq!(FixtureFormat::from_path(Path::new("ls.yaml")), None);
        assert!(ExpectationFile::load(Path::new("ls.yaml")).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ExpectationFile::load(Path::new("/nonexistent/fixture.toml")).unwrap_err();
        assert!(matches!(err, MockError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/fixture.toml"));
    }
}

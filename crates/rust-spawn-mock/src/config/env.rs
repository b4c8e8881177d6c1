//! Environment-based configuration.

use std::collections::HashMap;
use std::path::PathBuf;

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "SPAWN_MOCK";

/// Environment variable reader.
///
/// Reads the process environment by default. Tests hand it an explicit map
/// instead, so they never have to touch the real environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
    /// Explicit variables that replace the process environment.
    vars: Option<HashMap<String, String>>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a new environment config reader.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            vars: None,
        }
    }

    /// Read from `vars` instead of the process environment.
    ///
    /// Keys are full variable names, prefix included.
    #[must_use]
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let var_name = self.var_name(name);
        match &self.vars {
            Some(vars) => vars.get(&var_name).cloned(),
            None => std::env::var(&var_name).ok(),
        }
    }

    /// Get a string value with default.
    #[must_use]
    pub fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    /// Get a parsed value.
    ///
    /// A value that does not parse is treated as unset.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.get(name)?;
        let parsed = raw.trim().parse().ok();
        if parsed.is_none() {
            tracing::warn!(
                variable = %self.var_name(name),
                value = %raw,
                "ignoring unparsable environment variable"
            );
        }
        parsed
    }

    /// Get a parsed value with default.
    #[must_use]
    pub fn parse_or<T: std::str::FromStr>(&self, name: &str, default: T) -> T {
        self.parse(name).unwrap_or(default)
    }

    /// Get a path value. Empty values count as unset.
    #[must_use]
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        self.get(name)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Check if a variable is set.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Variable names, without the prefix.
pub mod vars {
    /// Cap on expectations listed in an unexpected-invocation report.
    pub const MAX_LISTED: &str = "MAX_LISTED";
    /// Receiver name used in the paste hint.
    pub const HINT_RECEIVER: &str = "HINT_RECEIVER";
    /// Base directory for relative fixture paths.
    pub const FIXTURE_DIR: &str = "FIXTURE_DIR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_names() {
        let env = EnvConfig::default().with_vars([("SPAWN_MOCK_MAX_LISTED", "4")]);
        assert_eq!(env.get(vars::MAX_LISTED).as_deref(), Some("4"));
        assert_eq!(env.parse::<usize>("max_listed"), Some(4));
        assert!(!env.is_set(vars::HINT_RECEIVER));
    }

    #[test]
    fn unparsable_is_unset() {
        let env = EnvConfig::default().with_vars([("SPAWN_MOCK_MAX_LISTED", "lots")]);
        assert_eq!(env.parse::<usize>(vars::MAX_LISTED), None);
        assert_eq!(env.parse_or(vars::MAX_LISTED, 7usize), 7);
    }

    #[test]
    fn empty_path_is_unset() {
        let env = EnvConfig::default().with_vars([("SPAWN_MOCK_FIXTURE_DIR", "")]);
        assert_eq!(env.path(vars::FIXTURE_DIR), None);
    }

    #[test]
    fn no_prefix() {
        let env = EnvConfig::new("").with_vars([("HINT_RECEIVER", "m")]);
        assert_eq!(env.get_or("hint_receiver", "mock"), "m");
    }
}

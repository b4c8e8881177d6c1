//! Configuration for the mock controller.
//!
//! These knobs only shape diagnostics and fixture loading; matching and fake
//! process behavior are not configurable.

pub mod env;

use std::path::{Path, PathBuf};

pub use env::EnvConfig;
use env::vars;

/// Default cap on expectations listed in an unexpected-invocation report.
///
/// Unlimited: every declared expectation is listed unless a cap is configured.
pub const DEFAULT_MAX_LISTED_EXPECTATIONS: usize = usize::MAX;

/// Default receiver name in the paste hint.
pub const DEFAULT_HINT_RECEIVER: &str = "mock";

/// Configuration for a [`SpawnMock`](crate::SpawnMock).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// How many declared expectations an unexpected-invocation report lists.
    pub max_listed_expectations: usize,
    /// Variable name used in the `Try ...` hint.
    pub hint_receiver: String,
    /// Base directory for relative fixture paths.
    pub fixture_root: Option<PathBuf>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            max_listed_expectations: DEFAULT_MAX_LISTED_EXPECTATIONS,
            hint_receiver: DEFAULT_HINT_RECEIVER.to_string(),
            fixture_root: None,
        }
    }
}

impl MockConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> MockConfigBuilder {
        MockConfigBuilder::new()
    }

    /// Read overrides from the `SPAWN_MOCK_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_config(&EnvConfig::default())
    }

    /// Read overrides from `source`, falling back to defaults.
    #[must_use]
    pub fn from_env_config(source: &EnvConfig) -> Self {
        let defaults = Self::default();
        Self {
            max_listed_expectations: source
                .parse_or(vars::MAX_LISTED, defaults.max_listed_expectations),
            hint_receiver: source.get_or(vars::HINT_RECEIVER, &defaults.hint_receiver),
            fixture_root: source.path(vars::FIXTURE_DIR),
        }
    }

    /// Resolve a fixture path against [`fixture_root`](Self::fixture_root).
    #[must_use]
    pub fn fixture_path(&self, path: &Path) -> PathBuf {
        match &self.fixture_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Builder for [`MockConfig`].
#[derive(Debug, Clone, Default)]
pub struct MockConfigBuilder {
    config: MockConfig,
}

impl MockConfigBuilder {
    /// Create a builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many expectations a report lists.
    #[must_use]
    pub const fn max_listed_expectations(mut self, max: usize) -> Self {
        self.config.max_listed_expectations = max;
        self
    }

    /// Set the hint receiver name.
    #[must_use]
    pub fn hint_receiver(mut self, name: impl Into<String>) -> Self {
        self.config.hint_receiver = name.into();
        self
    }

    /// Set the fixture root.
    #[must_use]
    pub fn fixture_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.fixture_root = Some(root.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> MockConfig {
        self.config
    }
}

//! Configuration system for rewind.
//!
//! Load search configuration from TOML or YAML files to control how
//! computations are spawned, how long a search may run, and how strictly
//! replayed bodies are checked, without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use rewind_config::{EnvironmentMode, RewindConfig};
//! use std::time::Duration;
//!
//! let config = RewindConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!
//!     [continuation]
//!     stack_size = 4194304
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert_eq!(config.continuation.stack_size, Some(4 * 1024 * 1024));
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use rewind_config::RewindConfig;
//!
//! let config = RewindConfig::load("rewind.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main rewind configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RewindConfig {
    /// Environment mode affecting replay assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// How computation threads are spawned.
    #[serde(default)]
    pub continuation: ContinuationConfig,

    /// Search behavior.
    #[serde(default)]
    pub search: SearchConfig,

    /// Termination configuration. Unset means exhaustive exploration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl RewindConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be honored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.continuation.stack_size == Some(0) {
            return Err(ConfigError::Invalid(
                "continuation.stack_size must be greater than zero".to_string(),
            ));
        }
        if let Some(termination) = &self.termination {
            if termination.run_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "termination.run_count_limit must be greater than zero".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the stack size of computation threads.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.continuation.stack_size = Some(bytes);
        self
    }

    /// Limits the number of replays a search may perform.
    pub fn with_run_count_limit(mut self, runs: u64) -> Self {
        self.termination = Some(TerminationConfig {
            run_count_limit: Some(runs),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Makes out-of-range replay indices a hard error.
    pub fn with_fail_on_stale_path(mut self, fail: bool) -> Self {
        self.search.fail_on_stale_path = fail;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rewind_config::RewindConfig;
    /// use std::time::Duration;
    ///
    /// let config = RewindConfig::from_toml_str(r#"
    ///     [termination]
    ///     seconds_spent_limit = 30
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the run count limit, if configured.
    pub fn run_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.run_count_limit)
    }
}

/// Environment mode affecting replay assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No additional checks.
    #[default]
    NonReproducible,

    /// Deterministic path enumeration. Behaves like the default since
    /// replays are deterministic by construction.
    Reproducible,

    /// Every run is replayed twice and both outcomes are compared.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if every run must be replayed and compared.
    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Settings for the threads backing suspendable computations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContinuationConfig {
    /// Stack size in bytes. `None` uses the platform default.
    pub stack_size: Option<usize>,

    /// Thread name. `None` derives one from the scope id.
    pub thread_name: Option<String>,
}

/// Search behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Whether an out-of-range replayed index aborts the search instead of
    /// failing the run.
    #[serde(default)]
    pub fail_on_stale_path: bool,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of replays.
    pub run_count_limit: Option<u64>,

    /// Maximum seconds to spend searching.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend searching.
    pub minutes_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;

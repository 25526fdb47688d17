//! Configuration loading and typed config structures for the agent.
//!
//! The configuration lives in `reflex-config.yaml`. Every field has a
//! default, so a missing file or a partial file is valid. A handful of
//! environment variables override file values for scripted runs.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with the value.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level agent configuration.
///
/// Mirrors the structure of `reflex-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReflexConfig {
    /// Step timing and episode bounds.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Frame replay and result output.
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl ReflexConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// A path that does not exist yields the defaults. Environment
    /// variables override file values:
    /// - `REFLEX_TICKS_PER_ACTION` overrides `agent.ticks_per_action`
    /// - `REFLEX_FRAMES_PATH` overrides `replay.frames_path`
    /// - `REFLEX_RESULTS_DIR` overrides `replay.results_dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yml::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `agent.ticks_per_action` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.ticks_per_action == 0 {
            return Err(ConfigError::Invalid {
                reason: "agent.ticks_per_action must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Override file values with environment variables when set.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("REFLEX_TICKS_PER_ACTION") {
            self.agent.ticks_per_action =
                val.trim().parse().map_err(|e| ConfigError::Invalid {
                    reason: format!("invalid REFLEX_TICKS_PER_ACTION: {e}"),
                })?;
        }
        if let Ok(val) = std::env::var("REFLEX_FRAMES_PATH") {
            self.replay.frames_path = val;
        }
        if let Ok(val) = std::env::var("REFLEX_RESULTS_DIR") {
            self.replay.results_dir = val;
        }
        Ok(())
    }
}

/// Step timing and episode bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentConfig {
    /// Emulator ticks a simple action is held for.
    #[serde(default = "default_ticks_per_action")]
    pub ticks_per_action: u64,

    /// Stop after this many steps even if the episode is not over.
    #[serde(default)]
    pub max_steps: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            ticks_per_action: default_ticks_per_action(),
            max_steps: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Frame replay and result output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayConfig {
    /// JSON file holding the recorded frames, one tile grid per tick.
    #[serde(default = "default_frames_path")]
    pub frames_path: String,

    /// Directory the episode result is written to.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            frames_path: default_frames_path(),
            results_dir: default_results_dir(),
        }
    }
}

const fn default_ticks_per_action() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_frames_path() -> String {
    "frames.json".to_owned()
}

fn default_results_dir() -> String {
    "results".to_owned()
}

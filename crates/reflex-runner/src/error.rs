//! Error types for the runner binary.
//!
//! [`RunnerError`] wraps every failure mode between loading the
//! configuration and writing the episode result, so `main` can propagate
//! with `?`.

use std::path::PathBuf;

/// Top-level error for the runner binary.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: reflex_core::config::ConfigError,
    },

    /// The frames file could not be read.
    #[error("failed to read frames from {}: {source}", path.display())]
    FramesRead {
        /// The frames file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The frames file is not a JSON array of tile grids.
    #[error("failed to parse frames from {}: {source}", path.display())]
    FramesParse {
        /// The frames file path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The results directory or file could not be written.
    #[error("failed to write results to {}: {source}", path.display())]
    ResultsWrite {
        /// The path being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

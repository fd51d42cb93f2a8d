//! Error types for the fixture harness
//!
//! The runner deliberately does not classify child-process failures beyond
//! "present or absent"; structured classification lives in
//! [`crate::scenario::RunOutcome`], derived from the captured streams.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fixture harness
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario Errors ===
    #[error("Scenario '{name}' not found at {path}")]
    ScenarioNotFound { name: String, path: PathBuf },

    #[error("Failed to spawn fixture entry point '{entry}': {source}")]
    Spawn {
        entry: String,
        #[source]
        source: io::Error,
    },

    // === Coverage Errors ===
    #[error("Malformed coverage payload: {0}")]
    CoveragePayload(#[from] serde_json::Error),

    #[error("Coverage payload lists source for '{0}' but carries no call counts for it")]
    MissingCallCounts(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a scenario not found error
    pub fn scenario_not_found(name: &str, path: impl Into<PathBuf>) -> Self {
        Self::ScenarioNotFound {
            name: name.to_string(),
            path: path.into(),
        }
    }
}

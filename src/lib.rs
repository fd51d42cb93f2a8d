//! Fixture harness - integration-test harness for a runner-wrapping task plugin
//!
//! Runs named fixture scenarios as child processes, captures their output,
//! and aggregates coverage instrumentation emitted on stdout.

pub mod commands;
pub mod common;
pub mod coverage;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use coverage::{CoverageAccumulator, CoveragePayload, FileCoverage};
pub use scenario::{Harness, RunOutcome, ScenarioRun};

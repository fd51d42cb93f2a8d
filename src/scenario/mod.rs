//! Scenario execution
//!
//! A scenario is a named fixture directory exercising one behavior of the
//! wrapped test runner. The runner spawns the fixture's entry point as a
//! child process and hands the captured (error, stdout, stderr) triple back
//! to the caller; the outcome classifier turns that triple into a typed
//! verdict.

mod outcome;
mod runner;

pub use outcome::RunOutcome;
pub use runner::{ExitError, Harness, ScenarioRun};

//! Coverage payload parsing and aggregation
//!
//! Instrumented fixtures run in a child process, so their coverage state
//! never reaches this process directly. Instead they print a single marker
//! line on stdout carrying the per-file data as JSON; the harness parses it
//! and folds it into an accumulator owned by the suite run.

mod accumulator;
mod payload;

pub use accumulator::{CoverageAccumulator, FileCoverage};
pub use payload::{CoveragePayload, COVERAGE_MARKER};

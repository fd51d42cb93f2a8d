//! Scenario runner
//!
//! Spawns one child process per scenario with the fixture directory as its
//! working directory, waits for completion, and captures both output
//! streams. No retries, no timeout at this layer, no cancellation: a hung
//! fixture hangs the suite.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::common::config::Config;
use crate::common::paths::{self, DEFAULT_ENTRY_POINT};
use crate::common::{Error, Result};
use crate::coverage::CoverageAccumulator;

/// Non-zero exit of a fixture process
///
/// The runner does not classify failures further; callers inspect the
/// captured streams (or [`ScenarioRun::outcome`]) to determine which
/// failure mode occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitError {
    /// Exit code, if the process exited normally (None when killed by signal)
    pub code: Option<i32>,
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "fixture exited with code {code}"),
            None => write!(f, "fixture terminated by signal"),
        }
    }
}

/// Result of one scenario execution
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    /// Scenario name this run belongs to
    pub scenario: String,
    /// Present when the fixture process exited non-zero
    pub exit_error: Option<ExitError>,
    /// Accumulated standard output
    pub stdout: String,
    /// Accumulated standard error
    pub stderr: String,
}

impl ScenarioRun {
    /// Whether the fixture process exited cleanly
    pub fn succeeded(&self) -> bool {
        self.exit_error.is_none()
    }
}

/// Drives scenario executions for one suite run
///
/// Owns the coverage accumulator, so merges are serialized by the borrow
/// checker: one `run` at a time per harness.
#[derive(Debug)]
pub struct Harness {
    scenarios_root: PathBuf,
    entry: String,
    shell: String,
    coverage: Option<CoverageAccumulator>,
}

impl Harness {
    /// Create a harness over a scenarios root, without coverage aggregation
    pub fn new(scenarios_root: impl Into<PathBuf>) -> Self {
        Self {
            scenarios_root: scenarios_root.into(),
            entry: DEFAULT_ENTRY_POINT.to_string(),
            shell: "sh".to_string(),
            coverage: None,
        }
    }

    /// Create a harness from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let mut harness = Self::new(config.scenarios.dir.clone());
        harness.entry = config.scenarios.entry.clone();
        harness.shell = config.scenarios.shell.clone();
        if config.coverage.enabled {
            harness.coverage = Some(CoverageAccumulator::new());
        }
        harness
    }

    /// Attach a fresh coverage accumulator
    pub fn with_coverage(mut self) -> Self {
        self.coverage = Some(CoverageAccumulator::new());
        self
    }

    /// Point the harness at a different scenarios root
    pub fn with_scenarios_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scenarios_root = dir.into();
        self
    }

    /// Root directory the harness resolves scenarios against
    pub fn scenarios_root(&self) -> &PathBuf {
        &self.scenarios_root
    }

    /// The merged coverage so far, if aggregation is enabled
    pub fn coverage(&self) -> Option<&CoverageAccumulator> {
        self.coverage.as_ref()
    }

    /// Detach the accumulator, ending coverage aggregation for this harness
    pub fn take_coverage(&mut self) -> Option<CoverageAccumulator> {
        self.coverage.take()
    }

    /// Run one scenario to completion and capture its output
    ///
    /// Spawns `<shell> <entry>` with the scenario's fixture directory as the
    /// working directory and waits for exit. If a coverage accumulator is
    /// attached, stdout is scanned for a payload and merged before the
    /// result is returned; without one the scan is skipped entirely.
    pub async fn run(&mut self, name: &str) -> Result<ScenarioRun> {
        let dir = paths::scenario_dir(&self.scenarios_root, name)?;
        debug!(scenario = name, dir = %dir.display(), "spawning fixture");

        let output = Command::new(&self.shell)
            .arg(&self.entry)
            .current_dir(&dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::Spawn {
                entry: self.entry.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if let Some(coverage) = self.coverage.as_mut() {
            if coverage.absorb_stdout(&stdout)? {
                debug!(scenario = name, "merged coverage payload");
            }
        }

        let exit_error = if output.status.success() {
            None
        } else {
            Some(ExitError {
                code: output.status.code(),
            })
        };

        info!(
            scenario = name,
            ok = exit_error.is_none(),
            "fixture finished"
        );

        Ok(ScenarioRun {
            scenario: name.to_string(),
            exit_error,
            stdout,
            stderr,
        })
    }
}

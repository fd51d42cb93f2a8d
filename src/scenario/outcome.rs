//! Structured run outcomes
//!
//! The wrapped runner reports everything as free text, so the raw streams
//! stay available for substring assertions. This classifier additionally
//! parses the well-known message shapes into a tagged verdict, letting
//! suites assert on variants and fields instead of message wording.

use super::runner::ScenarioRun;

/// Classified result of one scenario run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The fixture's tests all passed and the process exited cleanly
    Success,
    /// The wrapped runner counted failing tests on stderr
    TestFailures { failed: u32, total: u32 },
    /// The fixture aborted because a module could not be resolved
    ModuleNotFound { module: String },
    /// Any other non-zero exit
    RunnerCrash { message: String },
}

impl ScenarioRun {
    /// Derive the structured outcome from the captured streams
    pub fn outcome(&self) -> RunOutcome {
        if self.exit_error.is_none() {
            return RunOutcome::Success;
        }

        if let Some((failed, total)) = parse_failure_count(&self.stderr) {
            return RunOutcome::TestFailures { failed, total };
        }

        if let Some(module) = parse_missing_module(&self.stdout) {
            return RunOutcome::ModuleNotFound { module };
        }

        let message = self
            .stderr
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.exit_error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            });
        RunOutcome::RunnerCrash { message }
    }
}

/// Find a "<k> of <n> test failed" / "tests failed" message in stderr
fn parse_failure_count(stderr: &str) -> Option<(u32, u32)> {
    for line in stderr.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        for window in tokens.windows(5) {
            let &[failed, of, total, unit, verb] = window else {
                continue;
            };
            if of != "of" || (unit != "test" && unit != "tests") || verb != "failed" {
                continue;
            }
            if let (Ok(failed), Ok(total)) = (failed.parse(), total.parse()) {
                return Some((failed, total));
            }
        }
    }
    None
}

/// Find a "Cannot find module '<name>'" message in stdout
fn parse_missing_module(stdout: &str) -> Option<String> {
    let rest = stdout.split("Cannot find module '").nth(1)?;
    let module = rest.split('\'').next()?;
    if module.is_empty() {
        return None;
    }
    Some(module.to_string())
}

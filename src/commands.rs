//! CLI subcommands
//!
//! `run` executes a single scenario and prints its captured streams;
//! `run-all` walks every scenario directory in sequence, one child process
//! in flight at a time, and summarizes the verdicts.

use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;

use crate::common::config::Config;
use crate::common::{paths, Result};
use crate::scenario::{Harness, RunOutcome, ScenarioRun};

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single scenario and print its output
    Run {
        /// Scenario name (a subdirectory of the scenarios root)
        scenario: String,

        /// Override the scenarios root directory
        #[arg(long)]
        scenarios_dir: Option<PathBuf>,

        /// Print the fixture's captured stdout/stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run every scenario under the scenarios root
    RunAll {
        /// Override the scenarios root directory
        #[arg(long)]
        scenarios_dir: Option<PathBuf>,

        /// Write the merged coverage aggregate to this file as JSON
        #[arg(long)]
        coverage_out: Option<PathBuf>,
    },
}

/// Execute a subcommand; returns whether every fixture passed
pub async fn dispatch(command: Commands) -> Result<bool> {
    let config = Config::load(std::path::Path::new("."))?;

    match command {
        Commands::Run {
            scenario,
            scenarios_dir,
            verbose,
        } => {
            let mut harness = Harness::from_config(&config);
            if let Some(dir) = scenarios_dir {
                harness = harness.with_scenarios_root(dir);
            }

            let run = harness.run(&scenario).await?;
            print_verdict(&run, verbose);
            Ok(run.succeeded())
        }
        Commands::RunAll {
            scenarios_dir,
            coverage_out,
        } => {
            let mut harness = Harness::from_config(&config);
            if let Some(dir) = scenarios_dir {
                harness = harness.with_scenarios_root(dir);
            }

            let names = paths::list_scenarios(harness.scenarios_root())?;
            let mut passed = 0usize;
            let mut failed = 0usize;

            for name in &names {
                let run = harness.run(name).await?;
                print_verdict(&run, false);
                if run.succeeded() {
                    passed += 1;
                } else {
                    failed += 1;
                }
            }

            println!(
                "\n{} {} passed, {} failed ({} scenarios)",
                "Summary:".blue().bold(),
                passed.to_string().green(),
                failed.to_string().red(),
                names.len()
            );

            let report = coverage_out.or(config.coverage.report);
            if let Some(path) = report {
                if let Some(coverage) = harness.coverage() {
                    let json = serde_json::to_string_pretty(coverage)?;
                    std::fs::write(&path, json)?;
                    println!(
                        "{} {} files -> {}",
                        "Coverage:".blue().bold(),
                        coverage.len(),
                        path.display()
                    );
                }
            }

            Ok(failed == 0)
        }
    }
}

fn print_verdict(run: &ScenarioRun, verbose: bool) {
    match run.outcome() {
        RunOutcome::Success => {
            println!("{} {}", "✓".green(), run.scenario);
        }
        RunOutcome::TestFailures { failed, total } => {
            println!(
                "{} {} ({} of {} tests failed)",
                "✗".red(),
                run.scenario,
                failed,
                total
            );
        }
        RunOutcome::ModuleNotFound { module } => {
            println!(
                "{} {} (cannot find module '{}')",
                "✗".red(),
                run.scenario,
                module
            );
        }
        RunOutcome::RunnerCrash { message } => {
            println!("{} {} ({})", "✗".red(), run.scenario, message.dimmed());
        }
    }

    if verbose {
        if !run.stdout.is_empty() {
            print!("{}", run.stdout.dimmed());
        }
        if !run.stderr.is_empty() {
            eprint!("{}", run.stderr);
        }
    }
}

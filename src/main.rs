//! Fixture harness CLI
//!
//! Runs fixture scenarios against the wrapped test runner's entry point and
//! reports per-scenario verdicts plus the merged coverage aggregate.

use clap::Parser;
use fixture_harness::common::logging;
use fixture_harness::commands::{self, Commands};

#[derive(Parser)]
#[command(name = "fixture-harness", about = "Scenario harness for a runner-wrapping task plugin")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();

    match commands::dispatch(cli.command).await {
        Ok(all_passed) => {
            if !all_passed {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_intel` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Printing the rendered reports and choosing the exit code
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_intel::app::run_analysis;
use domain_intel::initialization::init_logger_with;
use domain_intel::{Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let inputs = opt.domains.clone();
    let config = Config::from(opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_analysis(&config, &inputs).await {
        Ok(outcome) => {
            println!("{}", outcome.output.trim_end());
            if outcome.invalid_inputs > 0 {
                log::warn!(
                    "{} of {} input(s) could not be analyzed",
                    outcome.invalid_inputs,
                    inputs.len()
                );
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_intel error: {:#}", e);
            process::exit(1);
        }
    }
}

//! Volfill CLI Binary
//!
//! Command-line interface for generating placeholder directory trees.

use anyhow::Context;
use clap::Parser;
use std::process;
use volfill::logging::init_logging;
use volfill::tooling::cli::{Cli, CliContext};

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context =
        CliContext::new(cli.config.clone()).context("Failed to load configuration")?;

    let logging = cli.logging_config(&context.config().logging);
    init_logging(&logging, cli.log_file.as_deref()).context("Failed to initialize logging")?;

    let output = context.execute(&cli.command)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod formatter;
pub mod lines;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;

use self::cli::{Cli, Command, RunArgs};
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::models::ScanReport;
use self::scanner::Traversal;

/// Parses the command line and dispatches to the requested command.
pub fn run() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Command::Filter => {
            println!("{}", OutputGenerator::generate_filter_listing());
            Ok(())
        }
        Command::Run(run_args) => scan(run_args),
    }
}

fn scan(args: RunArgs) -> Result<()> {
    // 1. Validate filters before touching the filesystem
    let config = resolve_config(args)?;

    // 2. Open the walk; a missing root is fatal
    let traversal = Traversal::new(&config.root, &config.filters, &config.walk)
        .with_context(|| format!("Cannot scan {}", config.root.display()))?;

    if !config.json_output {
        println!(
            "{}",
            OutputGenerator::generate_status(traversal.root(), &config.filters)
        );
    }

    // 3. Drain the walk; per-entry problems are collected, not fatal
    let start = Instant::now();
    let report = ScanReport::collect(traversal.inspect(|result| match result {
        Err(err) if err.is_fatal() => log::error!("{}", err),
        Err(err) => log::warn!("{}", err),
        Ok(_) => {}
    }));
    let elapsed = start.elapsed();

    // 4. Render
    let output = if config.json_output {
        OutputGenerator::format_json_output(&config.root, &report, elapsed)?
    } else {
        OutputGenerator::format_text_output(&config.root, &report, elapsed)
    };
    println!("{}", output);

    if !report.issues.is_empty() {
        log::info!(
            "{} entries could not be scanned under {}",
            report.issues.len(),
            config.root.display()
        );
    }

    Ok(())
}

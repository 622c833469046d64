//! # Debt Consolidator CLI
//!
//! Reads a newline-delimited record file, consolidates debtors that share a
//! phone number, and prints the report to stdout.

use anyhow::Context;
use clap::Parser;
use debt_consolidator::logging::init_structured_logging;
use debt_consolidator::{ConsolidatorConfig, ConsolidatorError, Pipeline};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "debt-consolidator")]
#[command(about = "Consolidate debt records into distinct debtors by shared phone numbers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Input file with one record per line
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Number of parse workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. "info" or "debt_consolidator=debug"
    #[arg(long)]
    log: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!(error = %err, "Consolidation failed");
        eprintln!("Error: {err:#}");

        let exit_code = match err.downcast_ref::<ConsolidatorError>() {
            Some(ConsolidatorError::Configuration(_)) => 2,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ConsolidatorConfig::load_unvalidated(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(file) = cli.file {
        config.input_path = file;
    }
    if let Some(workers) = cli.workers {
        config.worker_count = workers;
    }
    if cli.log.is_some() {
        config.log_filter = cli.log;
    }

    config.validate()?;

    init_structured_logging(config.log_filter.as_deref());
    info!(
        config_file = ?cli.config,
        input = %config.input_path.display(),
        worker_count = config.worker_count,
        "Configuration loaded"
    );

    let input = config.input_path.clone();
    let outcome = Pipeline::new(config)?
        .run_file()
        .with_context(|| format!("failed to consolidate {}", input.display()))?;

    print!("{}", outcome.report);
    Ok(())
}

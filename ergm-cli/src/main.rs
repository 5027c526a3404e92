//! CLI entry point for the directed ERGM Equilibrium Expectation estimator.
//!
//! Parses command-line arguments with clap, runs Algorithm S then Algorithm
//! EE, writes the theta/dzA trace files, and maps errors to an appropriate
//! exit code. Logging is initialized eagerly so subsequent operations can
//! emit structured diagnostics via `tracing`.

use std::process::ExitCode;

use clap::Parser;

use ergm_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, info};

fn try_main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let summary = run_cli(cli)?;
    info!(
        base_name = %summary.base_name,
        n = summary.n,
        arc_count = summary.arc_count,
        theta = ?summary.theta,
        "estimation finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        error!(error = %err, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Emit a fallback diagnostic to stderr when tracing initialization fails.
#[expect(
    clippy::print_stderr,
    reason = "emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}

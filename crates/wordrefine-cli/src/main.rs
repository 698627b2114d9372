//! Wordrefine CLI - strips comments and tracked changes from Word documents.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    let Some(input) = cli.input.as_deref() else {
        return match cli::print_usage() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    };

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match commands::refine::execute(input, &*formatter, cli.show_progress()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "warn,wordrefine_core=debug,wordrefine=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

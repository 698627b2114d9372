//! CLI argument parsing using clap.

use clap::CommandFactory;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wordrefine")]
#[command(author, version, long_about = None)]
#[command(
    about = "Removes comments and tracked changes from a Word .docx file",
    after_help = "The new file is saved in the same folder as the original, with a _c suffix."
)]
pub struct Cli {
    /// Path to the .docx file to clean
    #[arg(value_name = "INPUT_DOCX_FILE")]
    pub input: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Progress is only drawn for interactive, human-readable runs.
    pub const fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

/// Prints the full help text to stdout.
pub fn print_usage() -> std::io::Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}

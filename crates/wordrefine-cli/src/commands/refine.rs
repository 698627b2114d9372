//! Refine command implementation.

use crate::error::add_refine_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use std::path::Path;
use tracing::debug;
use wordrefine_core::NoopProgress;
use wordrefine_core::RefineConfig;
use wordrefine_core::refine_beside_source;

pub fn execute(input: &Path, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let config = RefineConfig::default();

    debug!(input = %input.display(), "starting refinement");

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Refining");
        add_refine_context(refine_beside_source(input, &config, &mut progress), input)?
    } else {
        let mut noop = NoopProgress;
        add_refine_context(refine_beside_source(input, &config, &mut noop), input)?
    };

    formatter.format_refine_result(&report)?;

    Ok(())
}

//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use wordrefine_core::RefineReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    /// Detail lines shown with `--verbose`.
    fn summary_lines(report: &RefineReport) -> Vec<String> {
        let scrub = &report.document;
        let mut lines = vec![
            format!("  Entries read:        {}", report.entries_read),
            format!("  Entries written:     {}", report.entries_written),
            format!("  Comment parts:       {}", report.dropped_parts.len()),
        ];
        lines.extend(report.dropped_parts.iter().map(|name| format!("    - {name}")));
        lines.extend([
            format!("  Comment ranges:      {}", scrub.comment_ranges),
            format!("  Comment references:  {}", scrub.comment_references),
            format!("  Deletions:           {}", scrub.deletions),
            format!("  Insertions:          {}", scrub.insertions),
            format!("  Format changes:      {}", scrub.format_changes),
            format!("  Tracking flags:      {}", report.track_revisions_removed),
            format!(
                "  Output size:         {}",
                Self::format_size(report.bytes_written)
            ),
            format!("  Duration:            {:?}", report.duration),
        ]);
        if report.is_clean() {
            lines.push("  No comments or tracked changes found".to_string());
        }
        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_refine_result(&self, report: &RefineReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} Done!", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line("Done!");
        }
        let _ = self
            .term
            .write_line(&format!("New file: {}", report.output_path.display()));

        if self.verbose {
            let _ = self.term.write_line("");
            for line in Self::summary_lines(report) {
                let _ = self.term.write_line(&line);
            }
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use wordrefine_core::RefineReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct RefineOutput {
    input_path: String,
    output_path: String,
    entries_read: usize,
    entries_written: usize,
    dropped_parts: Vec<String>,
    comment_ranges: usize,
    comment_references: usize,
    deletions: usize,
    insertions: usize,
    format_changes: usize,
    track_revisions_removed: usize,
    document_part_found: bool,
    settings_part_found: bool,
    clean: bool,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&RefineReport> for RefineOutput {
    fn from(report: &RefineReport) -> Self {
        Self {
            input_path: report.input_path.display().to_string(),
            output_path: report.output_path.display().to_string(),
            entries_read: report.entries_read,
            entries_written: report.entries_written,
            dropped_parts: report.dropped_parts.clone(),
            comment_ranges: report.document.comment_ranges,
            comment_references: report.document.comment_references,
            deletions: report.document.deletions,
            insertions: report.document.insertions,
            format_changes: report.document.format_changes,
            track_revisions_removed: report.track_revisions_removed,
            document_part_found: report.document_part_found,
            settings_part_found: report.settings_part_found,
            clean: report.is_clean(),
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_refine_result(&self, report: &RefineReport) -> Result<()> {
        let output = JsonOutput::success("refine", RefineOutput::from(report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("refine", format!("{error:?}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_refine_output_structure() {
        let mut report = RefineReport::new();
        report.output_path = PathBuf::from("report_c.docx");
        report.dropped_parts.push("word/comments.xml".to_string());
        report.document.insertions = 2;

        let output = JsonOutput::success("refine", RefineOutput::from(&report));
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["operation"], "refine");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["output_path"], "report_c.docx");
        assert_eq!(value["data"]["insertions"], 2);
        assert_eq!(value["data"]["dropped_parts"][0], "word/comments.xml");
        assert_eq!(value["data"]["clean"], false);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_output_structure() {
        let output = JsonOutput::error("refine", "Loading .docx file failed");
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "Loading .docx file failed");
        assert!(value.get("data").is_none());
    }
}

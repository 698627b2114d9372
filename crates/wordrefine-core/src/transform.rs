//! Per-entry transformation of a loaded package.
//!
//! Every entry gets exactly one [`PartRule`], chosen by its name:
//! comment parts are dropped, the document and settings parts are scrubbed,
//! everything else is copied byte for byte. Relative order is preserved and
//! names are never changed.

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::ProgressCallback;
use crate::RefineReport;
use crate::Result;
use crate::archive::SourcePackage;
use crate::scrub::disable_track_revisions;
use crate::scrub::scrub_document;
use crate::types::ArchiveEntry;
use crate::types::PartRule;
use crate::types::part::DOCUMENT_PART;
use crate::types::part::SETTINGS_PART;

/// Reads every entry of `source` and applies its rule.
///
/// Findings are accumulated into `report`. Entries are read even when they
/// are about to be dropped, so a corrupt comment part still aborts the run.
///
/// # Errors
///
/// Returns [`crate::RefineError::EntryRead`] if any entry cannot be read.
pub fn transform_package(
    source: &mut SourcePackage,
    report: &mut RefineReport,
    progress: &mut dyn ProgressCallback,
) -> Result<Vec<ArchiveEntry>> {
    let total = source.len();
    let mut entries = Vec::with_capacity(total);

    for index in 0..total {
        let entry = source.read_entry(index)?;
        progress.on_entry_start(&entry.name, total, index + 1);
        report.entries_read += 1;

        let name = entry.name.clone();
        if let Some(kept) = transform_entry(entry, report) {
            entries.push(kept);
        }
        progress.on_entry_complete(&name);
    }

    if !report.document_part_found {
        warn!("{DOCUMENT_PART} not found, document body left as is");
        report.add_warning(format!("{DOCUMENT_PART} not found in package"));
    }
    if !report.settings_part_found {
        warn!("{SETTINGS_PART} not found, revision tracking flag left as is");
        report.add_warning(format!("{SETTINGS_PART} not found in package"));
    }

    info!(
        path = %source.path().display(),
        read = report.entries_read,
        kept = entries.len(),
        dropped = report.dropped_parts.len(),
        "transformed package entries"
    );

    Ok(entries)
}

/// Applies the rule for a single entry.
///
/// Returns `None` when the entry is left out of the output.
///
/// # Examples
///
/// ```
/// use wordrefine_core::RefineReport;
/// use wordrefine_core::transform::transform_entry;
/// use wordrefine_core::types::ArchiveEntry;
///
/// let mut report = RefineReport::new();
/// let comments = ArchiveEntry::file("word/comments.xml", b"<w:comments/>".to_vec());
/// assert!(transform_entry(comments, &mut report).is_none());
/// assert_eq!(report.dropped_parts, ["word/comments.xml"]);
/// ```
pub fn transform_entry(entry: ArchiveEntry, report: &mut RefineReport) -> Option<ArchiveEntry> {
    let rule = PartRule::classify(&entry.name);

    match rule {
        PartRule::Drop => {
            debug!(name = %entry.name, "dropping comment part");
            report.dropped_parts.push(entry.name);
            None
        }
        PartRule::Document => {
            report.document_part_found = true;
            let mut entry = entry;
            let (data, counts) = scrub_document(std::mem::take(&mut entry.data));
            debug!(
                name = %entry.name,
                comment_ranges = counts.comment_ranges,
                comment_references = counts.comment_references,
                deletions = counts.deletions,
                insertions = counts.insertions,
                format_changes = counts.format_changes,
                "scrubbed document part"
            );
            report.document = counts;
            entry.data = data;
            Some(entry)
        }
        PartRule::Settings => {
            report.settings_part_found = true;
            let mut entry = entry;
            let (data, removed) = disable_track_revisions(std::mem::take(&mut entry.data));
            debug!(name = %entry.name, removed, "disabled revision tracking");
            report.track_revisions_removed += removed;
            entry.data = data;
            Some(entry)
        }
        PartRule::Passthrough => {
            debug!(name = %entry.name, "passing entry through");
            Some(entry)
        }
    }
}

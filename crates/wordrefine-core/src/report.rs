//! Refinement operation reporting.

use std::path::PathBuf;
use std::time::Duration;

use crate::scrub::DocumentScrub;

/// Report of a refinement run.
///
/// Contains what was found and removed, and statistics about the output.
///
/// # Examples
///
/// ```
/// use wordrefine_core::RefineReport;
///
/// let mut report = RefineReport::new();
/// assert!(report.is_clean());
///
/// report.dropped_parts.push("word/comments.xml".to_string());
/// assert!(!report.is_clean());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RefineReport {
    /// Path of the source package.
    pub input_path: PathBuf,

    /// Path of the cleaned package.
    pub output_path: PathBuf,

    /// Number of entries read from the source.
    pub entries_read: usize,

    /// Number of entries written to the output.
    pub entries_written: usize,

    /// Names of comment parts left out of the output, in source order.
    pub dropped_parts: Vec<String>,

    /// Matches removed from the document part.
    pub document: DocumentScrub,

    /// `<w:trackRevisions/>` flags removed from the settings part.
    pub track_revisions_removed: usize,

    /// Whether the source contained `word/document.xml`.
    pub document_part_found: bool,

    /// Whether the source contained `word/settings.xml`.
    pub settings_part_found: bool,

    /// Size of the written package in bytes.
    pub bytes_written: u64,

    /// Duration of the whole run.
    pub duration: Duration,

    /// Warnings generated during the run.
    pub warnings: Vec<String>,
}

impl RefineReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns `true` if the source carried no collaboration markup at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped_parts.is_empty()
            && self.document.is_empty()
            && self.track_revisions_removed == 0
    }

    /// Total number of markers and parts removed.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.dropped_parts.len() + self.document.total() + self.track_revisions_removed
    }
}

/// Callback trait for per-entry progress reporting.
///
/// Implementations must be `Send`.
///
/// # Examples
///
/// ```
/// use wordrefine_core::ProgressCallback;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_entry_start(&mut self, name: &str, total: usize, current: usize) {
///         println!("[{current}/{total}] {name}");
///     }
///
///     fn on_entry_complete(&mut self, _name: &str) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when an entry starts being processed.
    ///
    /// `current` is 1-indexed.
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called when an entry has been processed (kept or dropped).
    fn on_entry_complete(&mut self, name: &str);

    /// Called once the output package has been finalized.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}

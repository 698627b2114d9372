//! Error conversion utilities for CLI.
//!
//! Converts wordrefine-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use wordrefine_core::RefineError;

/// Converts `RefineError` to user-friendly anyhow error with context
pub fn convert_refine_error(err: RefineError, input: &Path) -> anyhow::Error {
    match err {
        RefineError::SourceNotFound { path } => {
            anyhow!(
                "Loading .docx file failed: '{}' does not exist\n\
                 HINT: Check the path and spelling of the input file.",
                path.display()
            )
        }
        RefineError::Read { path, source } => {
            anyhow!(
                "Loading .docx file failed: cannot read '{}': {}\n\
                 HINT: Check that the file is readable by the current user.",
                path.display(),
                source
            )
        }
        RefineError::InvalidArchive(reason) => {
            anyhow!(
                "Loading .docx file failed: '{}' is not a valid .docx package ({})\n\
                 HINT: The file may be corrupted, or it may be a legacy .doc file. \
                 Save it as .docx and try again.",
                input.display(),
                reason
            )
        }
        RefineError::EntryRead { name, reason } => {
            anyhow!(
                "Error occurred while removing comments from '{}': part '{}' could not be read ({})\n\
                 HINT: The package may be damaged. Open and re-save it in a word processor.",
                input.display(),
                name,
                reason
            )
        }
        RefineError::Write { path, source } => {
            anyhow!(
                "Failed to write file to file system: '{}': {}\n\
                 HINT: Check that the directory exists and is writable.",
                path.display(),
                source
            )
        }
        RefineError::Finalize { path, reason } => {
            anyhow!(
                "Failed to write file to file system: could not finalize '{}' ({})\n\
                 HINT: Check free disk space and try again.",
                path.display(),
                reason
            )
        }
        RefineError::InvalidPath { path, reason } => {
            anyhow!(
                "Cannot derive the output file name from '{}': {}\n\
                 HINT: Rename the input file so its name is valid UTF-8.",
                path.display(),
                reason
            )
        }
        RefineError::InvalidConfig(_) => anyhow::Error::from(err)
            .context(format!("Error processing document '{}'", input.display())),
    }
}

/// Adds context to a core result about the processed document
pub fn add_refine_context<T>(
    result: Result<T, RefineError>,
    input: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_refine_error(e, input))
}

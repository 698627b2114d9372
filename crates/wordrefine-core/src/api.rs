//! High-level public API for cleaning document packages.

use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::NoopProgress;
use crate::ProgressCallback;
use crate::RefineConfig;
use crate::RefineError;
use crate::RefineReport;
use crate::Result;
use crate::archive::SourcePackage;
use crate::transform::transform_package;
use crate::writer::write_package;
use crate::writer::write_package_to_vec;

/// Cleans the package at `input`, writing the result next to it.
///
/// The output name is derived with [`output_path_for`]:
/// `report.docx` becomes `report_c.docx` with the default configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The input cannot be read or is not a zip container
/// - The output name cannot be derived
/// - An entry cannot be read
/// - The output cannot be written or finalized
///
/// # Examples
///
/// ```no_run
/// use wordrefine_core::RefineConfig;
/// use wordrefine_core::refine_document;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = refine_document("report.docx", &RefineConfig::default())?;
/// println!("New file: {}", report.output_path.display());
/// # Ok(())
/// # }
/// ```
pub fn refine_document<P: AsRef<Path>>(input: P, config: &RefineConfig) -> Result<RefineReport> {
    refine_beside_source(input, config, &mut NoopProgress)
}

/// Cleans the package at `input`, writing the result next to it and
/// reporting per-entry progress.
///
/// The source is opened before the output name is derived, so an input that
/// cannot be loaded fails in the load stage whatever its name.
///
/// # Errors
///
/// See [`refine_document`].
pub fn refine_beside_source<P: AsRef<Path>>(
    input: P,
    config: &RefineConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<RefineReport> {
    config.validate()?;
    let start = Instant::now();

    let input = input.as_ref();
    let source = SourcePackage::open(input)?;
    let output = output_path_for(input, config)?;

    run_pipeline(source, &output, config, progress, start)
}

/// Cleans the package at `input` and writes it to `output`.
///
/// # Errors
///
/// See [`refine_document`].
pub fn refine_document_to<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &RefineConfig,
) -> Result<RefineReport> {
    let mut noop = NoopProgress;
    refine_document_with_progress(input, output, config, &mut noop)
}

/// Cleans the package at `input` and writes it to `output`, reporting
/// per-entry progress.
///
/// Stages run strictly in order: load, transform, write. A failure in any
/// stage stops the run; nothing is written unless the transform stage
/// succeeded, and the output only appears once it is complete.
///
/// # Errors
///
/// See [`refine_document`].
pub fn refine_document_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &RefineConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<RefineReport> {
    config.validate()?;
    let start = Instant::now();

    let source = SourcePackage::open(input)?;
    run_pipeline(source, output.as_ref(), config, progress, start)
}

/// Transforms an opened package and writes it to `output`.
fn run_pipeline(
    mut source: SourcePackage,
    output: &Path,
    config: &RefineConfig,
    progress: &mut dyn ProgressCallback,
    start: Instant,
) -> Result<RefineReport> {
    let mut report = RefineReport::new();
    report.input_path = source.path().to_path_buf();
    report.output_path = output.to_path_buf();

    let entries = transform_package(&mut source, &mut report, progress)?;
    drop(source);

    report.entries_written = entries.len();
    report.bytes_written = write_package(&entries, output, config)?;
    report.duration = start.elapsed();
    progress.on_complete();

    info!(
        input = %report.input_path.display(),
        output = %output.display(),
        removed = report.total_removed(),
        "refined document"
    );

    Ok(report)
}

/// Cleans a package held in memory and returns the cleaned bytes.
///
/// The report's paths are left empty.
///
/// # Errors
///
/// Returns an error if the bytes are not a zip container, an entry cannot be
/// read, or the output cannot be encoded.
///
/// # Examples
///
/// ```
/// use wordrefine_core::RefineConfig;
/// use wordrefine_core::refine_bytes;
/// use wordrefine_core::test_utils::create_test_docx;
///
/// let docx = create_test_docx(&[
///     ("word/document.xml", "<w:document/>"),
///     ("word/comments.xml", "<w:comments/>"),
/// ]);
/// let (cleaned, report) = refine_bytes(docx, &RefineConfig::default()).unwrap();
/// assert_eq!(report.entries_written, 1);
/// assert!(!cleaned.is_empty());
/// ```
pub fn refine_bytes(bytes: Vec<u8>, config: &RefineConfig) -> Result<(Vec<u8>, RefineReport)> {
    config.validate()?;

    let start = Instant::now();
    let mut report = RefineReport::new();

    let entries = {
        let mut source = SourcePackage::from_bytes(bytes)?;
        transform_package(&mut source, &mut report, &mut NoopProgress)?
    };

    report.entries_written = entries.len();
    let cleaned = write_package_to_vec(&entries, config)?;
    report.bytes_written = cleaned.len() as u64;
    report.duration = start.elapsed();

    Ok((cleaned, report))
}

/// Derives the output path for `input`: same directory, with
/// `config.output_suffix` inserted before the extension.
///
/// The extension is everything from the last `.` of the file name, so
/// `archive.tar.docx` becomes `archive.tar_c.docx` and a name without a dot
/// simply gets the suffix appended.
///
/// # Errors
///
/// Returns [`RefineError::InvalidPath`] if `input` has no file name or the
/// name is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wordrefine_core::RefineConfig;
/// use wordrefine_core::api::output_path_for;
///
/// let config = RefineConfig::default();
/// let output = output_path_for(Path::new("docs/report.docx"), &config).unwrap();
/// assert_eq!(output, Path::new("docs/report_c.docx"));
/// ```
pub fn output_path_for(input: &Path, config: &RefineConfig) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| RefineError::InvalidPath {
            path: input.to_path_buf(),
            reason: "path has no file name".to_string(),
        })?
        .to_str()
        .ok_or_else(|| RefineError::InvalidPath {
            path: input.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;

    let (stem, extension) = file_name
        .rfind('.')
        .map_or((file_name, ""), |dot| file_name.split_at(dot));

    Ok(input.with_file_name(format!("{stem}{}{extension}", config.output_suffix)))
}

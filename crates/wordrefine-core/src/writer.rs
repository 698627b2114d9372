//! Writing the cleaned package.
//!
//! Output goes to a temporary file in the destination directory and is only
//! moved into place after the central directory has been written and
//! flushed, so a failed run never leaves a truncated package behind.

use std::io::BufWriter;
use std::io::Seek;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::RefineConfig;
use crate::RefineError;
use crate::Result;
use crate::types::ArchiveEntry;
use crate::types::EntryKind;

/// Writes `entries` as a zip package at `output`, replacing it atomically.
///
/// Returns the size of the written package in bytes.
///
/// # Errors
///
/// Returns [`RefineError::Write`] if the destination cannot be created or an
/// entry cannot be written (including when `config.overwrite` is off and the
/// destination exists), and [`RefineError::Finalize`] if the archive cannot
/// be finalized.
pub fn write_package(entries: &[ArchiveEntry], output: &Path, config: &RefineConfig) -> Result<u64> {
    let write_err = |source: std::io::Error| RefineError::Write {
        path: output.to_path_buf(),
        source,
    };

    if !config.overwrite && output.exists() {
        return Err(write_err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;

    {
        let writer = BufWriter::new(temp.as_file_mut());
        let writer = write_entries(entries, writer, config, output)?;
        writer.into_inner().map_err(|e| RefineError::Finalize {
            path: output.to_path_buf(),
            reason: e.error().to_string(),
        })?;
    }

    temp.as_file().sync_all().map_err(|e| RefineError::Finalize {
        path: output.to_path_buf(),
        reason: e.to_string(),
    })?;
    let bytes_written = temp.as_file().metadata().map_err(write_err)?.len();

    if config.overwrite {
        temp.persist(output).map_err(|e| write_err(e.error))?;
    } else {
        temp.persist_noclobber(output)
            .map_err(|e| write_err(e.error))?;
    }

    info!(
        path = %output.display(),
        entries = entries.len(),
        bytes = bytes_written,
        "wrote cleaned package"
    );

    Ok(bytes_written)
}

/// Writes `entries` as a zip package into memory.
///
/// # Errors
///
/// Returns [`RefineError::Write`] or [`RefineError::Finalize`] as
/// [`write_package`] does.
pub fn write_package_to_vec(entries: &[ArchiveEntry], config: &RefineConfig) -> Result<Vec<u8>> {
    let cursor = write_entries(
        entries,
        std::io::Cursor::new(Vec::new()),
        config,
        Path::new("<memory>"),
    )?;
    Ok(cursor.into_inner())
}

/// Encodes `entries` into `writer` and finalizes the central directory.
fn write_entries<W: Write + Seek>(
    entries: &[ArchiveEntry],
    writer: W,
    config: &RefineConfig,
    output: &Path,
) -> Result<W> {
    let write_err = |e: zip::result::ZipError| RefineError::Write {
        path: output.to_path_buf(),
        source: std::io::Error::from(e),
    };

    let mut zip = ZipWriter::new(writer);
    let base = base_options(config);

    for entry in entries {
        let options = entry_options(entry, base, config);

        match entry.kind {
            EntryKind::Directory => {
                zip.add_directory(entry.name.as_str(), options)
                    .map_err(write_err)?;
            }
            EntryKind::File => {
                zip.start_file(entry.name.as_str(), options)
                    .map_err(write_err)?;
                zip.write_all(&entry.data)
                    .map_err(|source| RefineError::Write {
                        path: output.to_path_buf(),
                        source,
                    })?;
            }
        }
        debug!(name = %entry.name, bytes = entry.data.len(), "wrote entry");
    }

    zip.finish().map_err(|e| RefineError::Finalize {
        path: output.to_path_buf(),
        reason: e.to_string(),
    })
}

fn base_options(config: &RefineConfig) -> SimpleFileOptions {
    match config.compression_level {
        Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        level => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(level.map(i64::from)),
    }
}

fn entry_options(
    entry: &ArchiveEntry,
    base: SimpleFileOptions,
    config: &RefineConfig,
) -> SimpleFileOptions {
    let mut options = base.large_file(needs_zip64(entry.data.len()));
    if !config.preserve_metadata {
        return options;
    }

    if let Some(mode) = entry.unix_mode {
        options = options.unix_permissions(mode);
    }
    if let Some(time) = entry.last_modified {
        options = options.last_modified_time(time);
    }
    options
}

/// Entries of 4 GiB or more need Zip64 extra fields.
fn needs_zip64(len: usize) -> bool {
    len as u64 >= u64::from(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::read_entries;
    use std::fs;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn sample_entries() -> Vec<ArchiveEntry> {
        vec![
            ArchiveEntry::file("[Content_Types].xml", b"<Types/>".to_vec()),
            ArchiveEntry::directory("word/"),
            ArchiveEntry::file("word/document.xml", b"<w:document/>".to_vec()),
            ArchiveEntry::file("word/media/image1.png", vec![0x89, b'P', b'N', b'G', 0, 1, 2]),
        ]
    }

    #[test]
    fn test_write_package_to_vec_round_trips_content() {
        let bytes = write_package_to_vec(&sample_entries(), &RefineConfig::default()).unwrap();
        let entries = read_entries(&bytes);

        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            [
                "[Content_Types].xml",
                "word/",
                "word/document.xml",
                "word/media/image1.png",
            ]
        );
        assert_eq!(entries[2].1, b"<w:document/>");
        assert_eq!(entries[3].1, [0x89, b'P', b'N', b'G', 0, 1, 2]);
    }

    #[test]
    fn test_needs_zip64_at_u32_boundary() {
        assert!(!needs_zip64(0));
        assert!(!needs_zip64(64 * 1024));
        assert!(!needs_zip64(u32::MAX as usize - 1));
        assert!(needs_zip64(u32::MAX as usize));
        assert!(needs_zip64(u32::MAX as usize + 1));
    }

    #[test]
    fn test_deflate_used_by_default() {
        let bytes = write_package_to_vec(&sample_entries(), &RefineConfig::default()).unwrap();
        let mut archive = ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let file = archive.by_name("word/document.xml").unwrap();
        assert_eq!(file.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn test_level_zero_stores() {
        let config = RefineConfig::default().with_compression_level(Some(0));
        let bytes = write_package_to_vec(&sample_entries(), &config).unwrap();
        let mut archive = ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let file = archive.by_name("word/document.xml").unwrap();
        assert_eq!(file.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn test_preserves_unix_mode() {
        let mut entry = ArchiveEntry::file("word/document.xml", b"<w:document/>".to_vec());
        entry.unix_mode = Some(0o600);

        let bytes = write_package_to_vec(&[entry], &RefineConfig::default()).unwrap();
        let mut archive = ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let file = archive.by_index(0).unwrap();
        assert_eq!(file.unix_mode().map(|mode| mode & 0o777), Some(0o600));
    }

    #[test]
    fn test_write_package_to_disk() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("report_c.docx");

        let size = write_package(&sample_entries(), &output, &RefineConfig::default()).unwrap();
        assert!(output.exists());
        assert_eq!(size, fs::metadata(&output).unwrap().len());

        let entries = read_entries(&fs::read(&output).unwrap());
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_write_package_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("report_c.docx");
        fs::write(&output, b"stale content").unwrap();

        write_package(&sample_entries(), &output, &RefineConfig::default()).unwrap();
        let entries = read_entries(&fs::read(&output).unwrap());
        assert_eq!(entries[0].0, "[Content_Types].xml");
    }

    #[test]
    fn test_write_package_no_overwrite() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("report_c.docx");
        fs::write(&output, b"keep me").unwrap();

        let config = RefineConfig::default().with_overwrite(false);
        let err = write_package(&sample_entries(), &output, &config).unwrap_err();
        assert!(matches!(err, RefineError::Write { .. }));
        assert_eq!(fs::read(&output).unwrap(), b"keep me");
    }

    #[test]
    fn test_write_package_missing_directory() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("missing").join("report_c.docx");

        let err = write_package(&sample_entries(), &output, &RefineConfig::default()).unwrap_err();
        assert!(matches!(err, RefineError::Write { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("report_c.docx");

        write_package(&sample_entries(), &output, &RefineConfig::default()).unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, [std::ffi::OsString::from("report_c.docx")]);
    }
}

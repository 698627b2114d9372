//! Loading document packages and configuring refinement runs.

use std::fs;
use std::io::Cursor;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;
use zip::ZipArchive;

use crate::RefineConfig;
use crate::RefineError;
use crate::RefineReport;
use crate::Result;
use crate::types::ArchiveEntry;
use crate::types::EntryKind;

/// A document package opened for reading.
///
/// The whole file is read into memory when opened; entry content is
/// decompressed lazily by [`SourcePackage::read_entry`].
pub struct SourcePackage {
    path: PathBuf,
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl SourcePackage {
    /// Reads and opens the package at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::SourceNotFound`] if the file does not exist,
    /// [`RefineError::Read`] if it cannot be read, and
    /// [`RefineError::InvalidArchive`] if its bytes are not a zip container.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                RefineError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RefineError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let package = Self::from_bytes_at(bytes, path.to_path_buf())?;
        info!(
            path = %path.display(),
            entries = package.len(),
            "opened document package"
        );
        Ok(package)
    }

    /// Opens a package already held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::InvalidArchive`] if the bytes are not a zip
    /// container.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes_at(bytes, PathBuf::new())
    }

    fn from_bytes_at(bytes: Vec<u8>, path: PathBuf) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| RefineError::InvalidArchive(e.to_string()))?;
        Ok(Self { path, archive })
    }

    /// Path the package was opened from (empty for in-memory packages).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the package.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Returns `true` if the package has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Reads the entry at `index`, decompressing its content.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::EntryRead`] if the entry header or content
    /// cannot be read (bad index, corrupt data, unsupported compression).
    pub fn read_entry(&mut self, index: usize) -> Result<ArchiveEntry> {
        let mut file = self
            .archive
            .by_index(index)
            .map_err(|e| RefineError::EntryRead {
                name: format!("#{index}"),
                reason: e.to_string(),
            })?;

        let name = file.name().to_string();
        let kind = if file.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let mut data = Vec::new();
        if kind == EntryKind::File {
            file.read_to_end(&mut data)
                .map_err(|e| RefineError::EntryRead {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(ArchiveEntry {
            name,
            data,
            kind,
            unix_mode: file.unix_mode(),
            last_modified: file.last_modified(),
        })
    }
}

impl std::fmt::Debug for SourcePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcePackage")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

/// Builder for configuring a refinement run.
///
/// # Examples
///
/// ```no_run
/// use wordrefine_core::RefineBuilder;
/// use wordrefine_core::RefineConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = RefineBuilder::new()
///     .input("report.docx")
///     .output("/tmp/report-clean.docx")
///     .config(RefineConfig::default().with_compression_level(Some(9)))
///     .run()?;
/// println!("removed {} markers", report.total_removed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RefineBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<RefineConfig>,
}

impl RefineBuilder {
    /// Creates a new `RefineBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source package path.
    #[must_use]
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit output path.
    ///
    /// When unset, the output is written next to the input using the
    /// configured suffix.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: RefineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Runs the refinement with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no input was set, or if any pipeline stage fails.
    pub fn run(self) -> Result<RefineReport> {
        let input = self.input.ok_or_else(|| RefineError::InvalidPath {
            path: PathBuf::new(),
            reason: "input path not set".to_string(),
        })?;
        let config = self.config.unwrap_or_default();

        match self.output {
            Some(output) => crate::api::refine_document_to(input, output, &config),
            None => crate::api::refine_document(input, &config),
        }
    }
}

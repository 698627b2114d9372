//! Archive entry carried between pipeline stages.

use zip::DateTime;

/// Kind of entry in a document package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry (an XML part, media file, etc.).
    File,

    /// Explicit directory entry.
    ///
    /// Office writers rarely emit these, but some zip tools do.
    Directory,
}

/// A single named entry of a document package.
///
/// Names are unique within one package and are never rewritten by the
/// pipeline. `data` is empty for directories.
///
/// # Examples
///
/// ```
/// use wordrefine_core::types::ArchiveEntry;
///
/// let entry = ArchiveEntry::file("word/document.xml", b"<w:document/>".to_vec());
/// assert!(entry.is_file());
/// assert_eq!(entry.len(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name as stored in the container (e.g. `word/document.xml`).
    pub name: String,

    /// Entry content.
    pub data: Vec<u8>,

    /// Whether this is a file or a directory.
    pub kind: EntryKind,

    /// Unix permission bits recorded in the source container, if any.
    pub unix_mode: Option<u32>,

    /// Last-modified timestamp recorded in the source container, if any.
    pub last_modified: Option<DateTime>,
}

impl ArchiveEntry {
    /// Creates a file entry without metadata.
    #[must_use]
    pub fn file(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            kind: EntryKind::File,
            unix_mode: None,
            last_modified: None,
        }
    }

    /// Creates a directory entry without metadata.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            kind: EntryKind::Directory,
            unix_mode: None,
            last_modified: None,
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the entry has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

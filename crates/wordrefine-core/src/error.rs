//! Error types for document refinement.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `RefineError`.
pub type Result<T> = std::result::Result<T, RefineError>;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking the configuration and output path before any work starts.
    Preflight,
    /// Reading and opening the source package.
    Load,
    /// Reading entries and rewriting their content.
    Transform,
    /// Encoding and persisting the cleaned package.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preflight => write!(f, "preflight"),
            Self::Load => write!(f, "load"),
            Self::Transform => write!(f, "transform"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Errors that can occur while refining a document package.
#[derive(Error, Debug)]
pub enum RefineError {
    /// Source document does not exist.
    #[error("source document not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Source document exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Source bytes are not a valid zip container.
    #[error("invalid document package: {0}")]
    InvalidArchive(String),

    /// An entry's content could not be read from the source package.
    #[error("failed to read entry '{name}': {reason}")]
    EntryRead {
        /// Entry name (or index when the name is unavailable).
        name: String,
        /// Description of the failure.
        reason: String,
    },

    /// Output could not be created or written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Output archive could not be finalized.
    #[error("failed to finalize {path}: {reason}")]
    Finalize {
        /// The output path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Output path cannot be derived or is not acceptable.
    #[error("invalid output path {path}: {reason}")]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RefineError {
    /// Returns the pipeline stage that produced this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordrefine_core::RefineError;
    /// use wordrefine_core::error::Stage;
    ///
    /// let err = RefineError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.stage(), Stage::Load);
    /// ```
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::SourceNotFound { .. } | Self::Read { .. } | Self::InvalidArchive(_) => {
                Stage::Load
            }
            Self::EntryRead { .. } => Stage::Transform,
            Self::Write { .. } | Self::Finalize { .. } => Stage::Write,
            Self::InvalidPath { .. } | Self::InvalidConfig(_) => Stage::Preflight,
        }
    }

    /// Returns the inner reason string, if the variant carries one.
    ///
    /// ```
    /// use wordrefine_core::RefineError;
    ///
    /// let err = RefineError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) | Self::InvalidConfig(msg) => Some(msg),
            Self::EntryRead { reason, .. }
            | Self::Finalize { reason, .. }
            | Self::InvalidPath { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

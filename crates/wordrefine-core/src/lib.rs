//! Comment and revision stripping for Word documents.
//!
//! `wordrefine-core` loads a `.docx` package, drops its comment parts,
//! removes comment anchors and tracked revisions from the document body,
//! switches off revision tracking, and writes a cleaned copy. Every other
//! part is copied through unchanged.
//!
//! # Examples
//!
//! ```no_run
//! use wordrefine_core::RefineConfig;
//! use wordrefine_core::refine_document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RefineConfig::default();
//! let report = refine_document("report.docx", &config)?;
//! println!("Wrote {}", report.output_path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod report;
pub mod scrub;
pub mod transform;
pub mod types;
pub mod writer;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::output_path_for;
pub use api::refine_beside_source;
pub use api::refine_bytes;
pub use api::refine_document;
pub use api::refine_document_to;
pub use api::refine_document_with_progress;
pub use archive::RefineBuilder;
pub use archive::SourcePackage;
pub use config::RefineConfig;
pub use error::RefineError;
pub use error::Result;
pub use error::Stage;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::RefineReport;
pub use scrub::DocumentScrub;

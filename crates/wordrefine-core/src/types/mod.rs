//! Value types flowing through the refinement pipeline.
//!
//! - [`ArchiveEntry`]: one named blob of a package, plus the metadata needed
//!   to re-create it in the output container.
//! - [`PartRule`]: the fixed rule a package part is subject to, chosen by
//!   exact name.

pub mod entry;
pub mod part;

pub use entry::ArchiveEntry;
pub use entry::EntryKind;
pub use part::PartRule;

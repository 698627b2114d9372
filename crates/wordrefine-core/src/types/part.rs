//! Fixed package part names and the rule each one is subject to.

/// Main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Document settings.
pub const SETTINGS_PART: &str = "word/settings.xml";

/// Comment definition parts, dropped from the output entirely.
pub const COMMENT_PARTS: [&str; 5] = [
    "word/comments.xml",
    "word/commentsExtended.xml",
    "word/commentsIds.xml",
    "word/commentsIdsExt.xml",
    "word/commentsExtensible.xml",
];

/// Rule applied to a package entry, chosen by exact name.
///
/// # Examples
///
/// ```
/// use wordrefine_core::types::PartRule;
///
/// assert_eq!(PartRule::classify("word/comments.xml"), PartRule::Drop);
/// assert_eq!(PartRule::classify("word/document.xml"), PartRule::Document);
/// assert_eq!(PartRule::classify("word/settings.xml"), PartRule::Settings);
/// assert_eq!(PartRule::classify("word/styles.xml"), PartRule::Passthrough);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRule {
    /// Omit the entry from the output.
    Drop,

    /// Strip comment ranges, references and tracked revisions.
    Document,

    /// Disable revision tracking.
    Settings,

    /// Copy the entry unchanged.
    Passthrough,
}

impl PartRule {
    /// Classifies an entry by its name.
    ///
    /// Matching is exact and case-sensitive, the same way zip entry names are
    /// resolved inside a package.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        if COMMENT_PARTS.contains(&name) {
            Self::Drop
        } else if name == DOCUMENT_PART {
            Self::Document
        } else if name == SETTINGS_PART {
            Self::Settings
        } else {
            Self::Passthrough
        }
    }
}

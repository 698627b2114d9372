//! Pattern-based removal of collaboration markup from serialized XML.
//!
//! The rules work on the raw bytes of a part rather than on a parsed tree.
//! Every pattern is ASCII and compiled with Unicode mode off, so content
//! that is not valid UTF-8 passes through untouched outside of the matched
//! spans. `.` never crosses a line break, and every span is matched
//! shortest-first so each start marker pairs with the nearest end marker.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

// Order matters: ranges before references, deletions before insertions.
#[allow(clippy::expect_used)]
static COMMENT_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)<w:commentRangeStart [^>]*/>.*?<w:commentRangeEnd [^>]*/>")
        .expect("comment range pattern is valid")
});

#[allow(clippy::expect_used)]
static COMMENT_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)<w:commentReference [^>]*/>").expect("comment reference pattern is valid")
});

#[allow(clippy::expect_used)]
static DELETION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)<w:del [^>]*>.*?</w:del>").expect("deletion pattern is valid")
});

#[allow(clippy::expect_used)]
static INSERTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)<w:ins [^>]*>(.*?)</w:ins>").expect("insertion pattern is valid")
});

#[allow(clippy::expect_used)]
static FORMAT_CHANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)<w:rPrChange [^>]*>.*?</w:rPrChange>")
        .expect("format change pattern is valid")
});

/// Self-closing flag that turns on revision tracking for a document.
pub const TRACK_REVISIONS_TAG: &str = "<w:trackRevisions/>";

#[allow(clippy::expect_used)]
static TRACK_REVISIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?-u){}", regex::escape(TRACK_REVISIONS_TAG)))
        .expect("track revisions pattern is valid")
});

/// Number of matches removed from a document part, per rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentScrub {
    /// Comment ranges removed together with the text they enclose.
    pub comment_ranges: usize,

    /// Comment reference anchors removed.
    pub comment_references: usize,

    /// Tracked deletions removed together with their content.
    pub deletions: usize,

    /// Tracked insertions unwrapped (content kept).
    pub insertions: usize,

    /// Run-property change records removed.
    pub format_changes: usize,
}

impl DocumentScrub {
    /// Total number of removed or unwrapped markers.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.comment_ranges
            + self.comment_references
            + self.deletions
            + self.insertions
            + self.format_changes
    }

    /// Returns `true` if nothing was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Strips comments and tracked revisions from the main document part.
///
/// Applies, in order: comment ranges (with enclosed content), comment
/// references, tracked deletions (with content), tracked insertions (wrapper
/// only) and run-property change records (with content).
///
/// # Examples
///
/// ```
/// use wordrefine_core::scrub::scrub_document;
///
/// let xml = br#"<w:p><w:ins w:id="2" w:author="A">NEW</w:ins><w:del w:id="3" w:author="A">OLD</w:del></w:p>"#;
/// let (cleaned, counts) = scrub_document(xml.to_vec());
/// assert_eq!(cleaned, b"<w:p>NEW</w:p>");
/// assert_eq!(counts.insertions, 1);
/// assert_eq!(counts.deletions, 1);
/// ```
pub fn scrub_document(content: Vec<u8>) -> (Vec<u8>, DocumentScrub) {
    let mut counts = DocumentScrub::default();

    let (content, n) = replace_all(&COMMENT_RANGE, content, b"");
    counts.comment_ranges = n;
    let (content, n) = replace_all(&COMMENT_REFERENCE, content, b"");
    counts.comment_references = n;
    let (content, n) = replace_all(&DELETION, content, b"");
    counts.deletions = n;
    let (content, n) = replace_all(&INSERTION, content, b"${1}");
    counts.insertions = n;
    let (content, n) = replace_all(&FORMAT_CHANGE, content, b"");
    counts.format_changes = n;

    (content, counts)
}

/// Removes every `<w:trackRevisions/>` flag from the settings part.
///
/// Returns the rewritten content and the number of flags removed. Only the
/// exact self-closing form is recognized.
///
/// ```
/// use wordrefine_core::scrub::disable_track_revisions;
///
/// let (cleaned, removed) = disable_track_revisions(b"<w:settings><w:trackRevisions/></w:settings>".to_vec());
/// assert_eq!(cleaned, b"<w:settings></w:settings>");
/// assert_eq!(removed, 1);
/// ```
pub fn disable_track_revisions(content: Vec<u8>) -> (Vec<u8>, usize) {
    replace_all(&TRACK_REVISIONS, content, b"")
}

fn replace_all(pattern: &Regex, content: Vec<u8>, replacement: &[u8]) -> (Vec<u8>, usize) {
    let count = pattern.find_iter(&content).count();
    if count == 0 {
        return (content, 0);
    }
    let replaced = pattern.replace_all(&content, replacement).into_owned();
    (replaced, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrub(xml: &str) -> (String, DocumentScrub) {
        let (bytes, counts) = scrub_document(xml.as_bytes().to_vec());
        (String::from_utf8_lossy(&bytes).into_owned(), counts)
    }

    #[test]
    fn test_comment_range_removes_enclosed_text() {
        let (out, counts) = scrub(
            r#"<w:p><w:commentRangeStart w:id="1"/>KEPT TEXT<w:commentRangeEnd w:id="1"/><w:commentReference w:id="1"/></w:p>"#,
        );
        assert_eq!(out, "<w:p></w:p>");
        assert_eq!(counts.comment_ranges, 1);
        assert_eq!(counts.comment_references, 1);
    }

    #[test]
    fn test_comment_ranges_are_non_greedy() {
        let (out, counts) = scrub(concat!(
            r#"<w:commentRangeStart w:id="1"/>first<w:commentRangeEnd w:id="1"/>"#,
            "BETWEEN",
            r#"<w:commentRangeStart w:id="2"/>second<w:commentRangeEnd w:id="2"/>"#,
            "AFTER",
        ));
        assert_eq!(out, "BETWEENAFTER");
        assert_eq!(counts.comment_ranges, 2);
    }

    #[test]
    fn test_insertion_keeps_content() {
        let (out, counts) = scrub(r#"<w:p><w:ins w:id="2" w:author="A">NEW TEXT</w:ins></w:p>"#);
        assert_eq!(out, "<w:p>NEW TEXT</w:p>");
        assert_eq!(counts.insertions, 1);
    }

    #[test]
    fn test_deletion_removes_content() {
        let (out, counts) = scrub(r#"<w:p><w:del w:id="3" w:author="A">OLD TEXT</w:del></w:p>"#);
        assert_eq!(out, "<w:p></w:p>");
        assert!(!out.contains("OLD TEXT"));
        assert_eq!(counts.deletions, 1);
    }

    #[test]
    fn test_format_change_removed() {
        let (out, counts) = scrub(
            r#"<w:rPr><w:b/><w:rPrChange w:id="4" w:author="A"><w:rPr><w:i/></w:rPr></w:rPrChange></w:rPr>"#,
        );
        assert_eq!(out, "<w:rPr><w:b/></w:rPr>");
        assert_eq!(counts.format_changes, 1);
    }

    #[test]
    fn test_multiple_insertions_unwrapped_individually() {
        let (out, counts) = scrub(
            r#"<w:ins w:id="1" w:author="A">one</w:ins> and <w:ins w:id="2" w:author="B">two</w:ins>"#,
        );
        assert_eq!(out, "one and two");
        assert_eq!(counts.insertions, 2);
    }

    #[test]
    fn test_deletion_inside_insertion() {
        // Deletions run first, so the enclosing insertion is still unwrapped.
        let (out, _) = scrub(
            r#"<w:ins w:id="1" w:author="A">keep<w:del w:id="2" w:author="B">drop</w:del>this</w:ins>"#,
        );
        assert_eq!(out, "keepthis");
    }

    #[test]
    fn test_patterns_do_not_cross_lines() {
        let xml = "<w:del w:id=\"3\" w:author=\"A\">OLD\nTEXT</w:del>";
        let (out, counts) = scrub(xml);
        assert_eq!(out, xml);
        assert_eq!(counts.deletions, 0);
    }

    #[test]
    fn test_tags_without_attributes_untouched() {
        // Every rule requires a space after the tag name.
        let xml = "<w:ins>text</w:ins><w:del>gone?</w:del>";
        let (out, counts) = scrub(xml);
        assert_eq!(out, xml);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_similar_tag_names_untouched() {
        let xml = r#"<w:delText xml:space="preserve">x</w:delText><w:insideH w:val="single"/>"#;
        let (out, counts) = scrub(xml);
        assert_eq!(out, xml);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_clean_document_unchanged() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>"#;
        let (out, counts) = scrub(xml);
        assert_eq!(out, xml);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_non_utf8_bytes_preserved() {
        let mut xml = b"<w:t>".to_vec();
        xml.extend_from_slice(&[0xff, 0xfe]);
        xml.extend_from_slice(br#"</w:t><w:del w:id="1" w:author="A">x</w:del>"#);

        let mut expected = b"<w:t>".to_vec();
        expected.extend_from_slice(&[0xff, 0xfe]);
        expected.extend_from_slice(b"</w:t>");

        let (out, counts) = scrub_document(xml);
        assert_eq!(counts.deletions, 1);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_disable_track_revisions() {
        let settings = r#"<w:settings><w:zoom w:percent="100"/><w:trackRevisions/><w:defaultTabStop w:val="720"/></w:settings>"#;
        let (out, removed) = disable_track_revisions(settings.as_bytes().to_vec());
        assert_eq!(removed, 1);
        assert_eq!(
            out,
            br#"<w:settings><w:zoom w:percent="100"/><w:defaultTabStop w:val="720"/></w:settings>"#
        );
    }

    #[test]
    fn test_disable_track_revisions_literal_only() {
        let settings = r#"<w:settings><w:trackRevisions w:val="true"/></w:settings>"#;
        let (out, removed) = disable_track_revisions(settings.as_bytes().to_vec());
        assert_eq!(removed, 0);
        assert_eq!(out, settings.as_bytes());
    }

    #[test]
    fn test_scrub_total() {
        let counts = DocumentScrub {
            comment_ranges: 1,
            comment_references: 2,
            deletions: 3,
            insertions: 4,
            format_changes: 5,
        };
        assert_eq!(counts.total(), 15);
        assert!(!counts.is_empty());
    }
}

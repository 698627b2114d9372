//! Test utilities for building document packages in memory.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;

use zip::ZipArchive;
use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Creates an in-memory `.docx` package from `(name, xml)` pairs.
///
/// Entries are stored uncompressed with mode 0o644, in the given order.
///
/// # Examples
///
/// ```
/// use wordrefine_core::test_utils::create_test_docx;
///
/// let docx = create_test_docx(&[
///     ("word/document.xml", "<w:document/>"),
///     ("word/comments.xml", "<w:comments/>"),
/// ]);
/// assert!(!docx.is_empty());
/// ```
#[must_use]
pub fn create_test_docx(entries: &[(&str, &str)]) -> Vec<u8> {
    let entries: Vec<(&str, &[u8])> = entries
        .iter()
        .map(|(name, xml)| (*name, xml.as_bytes()))
        .collect();
    create_test_docx_bytes(&entries)
}

/// Creates an in-memory `.docx` package from `(name, bytes)` pairs.
#[must_use]
pub fn create_test_docx_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Reads every entry of an in-memory package as `(name, bytes)` pairs, in
/// stored order.
#[must_use]
pub fn read_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        entries.push((file.name().to_string(), data));
    }

    entries
}

/// Flips one byte inside the first occurrence of `content` in a package
/// built by [`create_test_docx`].
///
/// Entries are stored uncompressed, so the content appears verbatim and the
/// entry's CRC-32 no longer matches once a byte is changed.
pub fn corrupt_stored_content(package: &mut [u8], content: &[u8]) {
    let start = package
        .windows(content.len())
        .position(|window| window == content)
        .expect("content not found in package");
    package[start + content.len() / 2] ^= 0x20;
}

/// Minimal `word/document.xml` wrapping `body` in a document and body
/// element.
#[must_use]
pub fn document_xml(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}</w:body></w:document>"
        ),
        body
    )
}

/// Minimal `word/settings.xml` wrapping `children` in a settings element.
#[must_use]
pub fn settings_xml(children: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "{}</w:settings>"
        ),
        children
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_read_back() {
        let docx = create_test_docx(&[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", "<w:document/>"),
        ]);

        let entries = read_entries(&docx);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "[Content_Types].xml");
        assert_eq!(entries[1].1, b"<w:document/>");
    }

    #[test]
    fn test_corrupt_stored_content_changes_one_byte() {
        let original = create_test_docx(&[("word/comments.xml", "<w:comments/>")]);
        let mut corrupted = original.clone();
        corrupt_stored_content(&mut corrupted, b"<w:comments/>");

        let changed = original
            .iter()
            .zip(&corrupted)
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_document_xml_wraps_body() {
        let xml = document_xml("<w:p/>");
        assert!(xml.contains("<w:body><w:p/></w:body>"));
        assert!(xml.starts_with("<?xml"));
    }
}

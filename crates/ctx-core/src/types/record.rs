//! The record produced for each accepted, successfully read file.

use std::borrow::Cow;

use camino::{Utf8Path, Utf8PathBuf};

/// A file's path and full byte content.
///
/// One record is produced per accepted file that could be read. The record
/// is moved into the sink, so ownership of the content transfers fully and
/// no state is shared between the worker that produced it and the consumer.
///
/// The path is the path as walked: it is prefixed by the scan root exactly
/// as the root was configured (relative roots yield relative paths).
///
/// # Examples
///
/// ```
/// use ctx_core::FileRecord;
///
/// let record = FileRecord::new("src/main.go", b"package main\n".to_vec());
/// assert_eq!(record.path.as_str(), "src/main.go");
/// assert_eq!(record.len(), 13);
/// assert_eq!(record.content_lossy(), "package main\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileRecord {
    /// Path of the file as produced by the walk.
    pub path: Utf8PathBuf,

    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl FileRecord {
    /// Creates a new record.
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the content length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the file was empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the content as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn content_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Splits the record into its path and content.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Utf8PathBuf, Vec<u8>) {
        (self.path, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let record = FileRecord::new("a.go", b"package a".to_vec());
        assert_eq!(record.path(), Utf8Path::new("a.go"));
        assert_eq!(record.len(), 9);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_empty_record() {
        let record = FileRecord::new("empty.ts", Vec::new());
        assert!(record.is_empty());
        assert_eq!(record.content_lossy(), "");
    }

    #[test]
    fn test_content_lossy_replaces_invalid_utf8() {
        let record = FileRecord::new("bin.sql", vec![b'o', b'k', 0xFF]);
        assert_eq!(record.content_lossy(), "ok\u{FFFD}");
    }

    #[test]
    fn test_into_parts() {
        let record = FileRecord::new("x.html", b"<p/>".to_vec());
        let (path, content) = record.into_parts();
        assert_eq!(path.as_str(), "x.html");
        assert_eq!(content, b"<p/>");
    }

    #[test]
    fn test_records_order_by_path() {
        let mut records = vec![
            FileRecord::new("b.go", Vec::new()),
            FileRecord::new("a.go", Vec::new()),
        ];
        records.sort();
        assert_eq!(records[0].path.as_str(), "a.go");
    }
}

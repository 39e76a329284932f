//! Context assembly sink for the `repo-ctx` binary.
//!
//! [`ContextBuilder`] collects every record a scan delivers and renders
//! them into a single text blob, one section per file:
//!
//! ```text
//!
//! --- FILE: src/main.go ---
//! package main
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ctx_core::FileRecord;
use ctx_scanner::{FileSink, StatsSnapshot};
use parking_lot::Mutex;
use serde::Serialize;

/// Accumulates scanned files for rendering.
///
/// Reader threads call [`FileSink::accept`] concurrently; the record list is
/// guarded by a `parking_lot` mutex and the counters are atomic.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    records: Mutex<Vec<FileRecord>>,
    files: AtomicU64,
    bytes: AtomicU64,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files accepted so far.
    pub fn file_count(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }

    /// Total content bytes accepted so far.
    pub fn byte_count(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }

    /// Renders the collected files, sorted by path.
    ///
    /// Paths are shown relative to `root` when they lie beneath it.
    pub fn render(self, root: &Utf8Path) -> String {
        let mut records = self.records.into_inner();
        records.sort_unstable_by(|a, b| a.path.cmp(&b.path));

        let capacity = records.iter().map(|r| r.len() + r.path.as_str().len() + 16).sum();
        let mut out = String::with_capacity(capacity);

        for record in &records {
            let shown = record.path.strip_prefix(root).unwrap_or(&record.path);
            out.push_str("\n--- FILE: ");
            out.push_str(shown.as_str());
            out.push_str(" ---\n");
            out.push_str(&record.content_lossy());
            out.push('\n');
        }

        out
    }
}

impl FileSink for ContextBuilder {
    fn accept(&self, record: FileRecord) {
        self.files.fetch_add(1, Ordering::Relaxed);
        self.bytes
            .fetch_add(u64::try_from(record.len()).unwrap_or(u64::MAX), Ordering::Relaxed);
        self.records.lock().push(record);
    }
}

/// Formats the one-line human summary.
pub fn summary_line(files: u64, elapsed: Duration) -> String {
    format!("{files} files loaded into context ({elapsed:?})")
}

/// Machine-readable scan summary printed by `--json`.
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    /// Scanned root directory.
    pub root: Utf8PathBuf,
    /// Files loaded into the context.
    pub files: u64,
    /// Total bytes loaded.
    pub bytes: u64,
    /// Wall-clock scan time in milliseconds.
    pub elapsed_ms: u64,
    /// Where the context was written, if anywhere.
    pub output: Option<Utf8PathBuf>,
    /// Scanner counters.
    pub stats: StatsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sorted_and_relative() {
        let builder = ContextBuilder::new();
        builder.accept(FileRecord::new("/repo/sub/d.go", b"package sub".to_vec()));
        builder.accept(FileRecord::new("/repo/a.go", b"package a".to_vec()));

        assert_eq!(builder.file_count(), 2);
        assert_eq!(builder.byte_count(), 20);

        let rendered = builder.render(Utf8Path::new("/repo"));
        assert_eq!(
            rendered,
            "\n--- FILE: a.go ---\npackage a\n\n--- FILE: sub/d.go ---\npackage sub\n"
        );
    }

    #[test]
    fn test_render_keeps_paths_outside_root() {
        let builder = ContextBuilder::new();
        builder.accept(FileRecord::new("/elsewhere/x.ts", b"x".to_vec()));

        let rendered = builder.render(Utf8Path::new("/repo"));
        assert!(rendered.contains("--- FILE: /elsewhere/x.ts ---"));
    }

    #[test]
    fn test_render_invalid_utf8_is_lossy() {
        let builder = ContextBuilder::new();
        builder.accept(FileRecord::new("/repo/b.sql", vec![b'o', b'k', 0xff]));

        let rendered = builder.render(Utf8Path::new("/repo"));
        assert!(rendered.contains("ok\u{fffd}"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(ContextBuilder::new().render(Utf8Path::new("/repo")), "");
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(3, Duration::from_millis(12)),
            "3 files loaded into context (12ms)"
        );
    }

    #[test]
    fn test_scan_summary_json() {
        let summary = ScanSummary {
            root: Utf8PathBuf::from("repo"),
            files: 2,
            bytes: 20,
            elapsed_ms: 5,
            output: None,
            stats: StatsSnapshot {
                dirs_pruned: 1,
                files_filtered: 1,
                files_dispatched: 2,
                files_delivered: 2,
                read_errors: 0,
                bytes_read: 20,
            },
        };

        insta::assert_json_snapshot!(summary, @r#"
        {
          "root": "repo",
          "files": 2,
          "bytes": 20,
          "elapsed_ms": 5,
          "output": null,
          "stats": {
            "dirs_pruned": 1,
            "files_filtered": 1,
            "files_dispatched": 2,
            "files_delivered": 2,
            "read_errors": 0,
            "bytes_read": 20
          }
        }
        "#);
    }
}

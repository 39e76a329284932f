//! Loading glob patterns from a line-oriented ignore-file.
//!
//! The format is a simplified `.gitignore`: every non-blank line that does
//! not start with `#` is taken literally as a glob matched against file base
//! names. There are no negations, no path-anchored
//! patterns, and no directory-only patterns.
//!
//! A missing or unreadable ignore-file yields an empty pattern list rather
//! than an error, so a repository without one scans normally.
//!
//! # Examples
//!
//! ```
//! use ctx_scanner::parse_ignore_patterns;
//!
//! let patterns = parse_ignore_patterns("# generated\n*.pb.go\n\n  *_test.go  \n");
//! assert_eq!(patterns, vec!["*.pb.go", "*_test.go"]);
//! ```

use std::fs;

use camino::Utf8Path;
use tracing::debug;

/// Parses ignore-file text into glob patterns.
///
/// Lines are trimmed of surrounding whitespace; empty lines and comment
/// lines (starting with `#`) are skipped. Order is preserved.
#[must_use]
pub fn parse_ignore_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

/// Reads glob patterns from the ignore-file at `path`.
///
/// Returns an empty list if the file cannot be opened or read.
#[must_use]
pub fn load_ignore_patterns(path: &Utf8Path) -> Vec<String> {
    match fs::read(path) {
        Ok(bytes) => {
            let patterns = parse_ignore_patterns(&String::from_utf8_lossy(&bytes));
            debug!(path = %path, count = patterns.len(), "Loaded ignore-file");
            patterns
        }
        Err(e) => {
            debug!(path = %path, error = %e, "No usable ignore-file, continuing without patterns");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# comment\n\n*.log\n   \n#another\nvendor_*.go\n";
        assert_eq!(parse_ignore_patterns(text), vec!["*.log", "vendor_*.go"]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_ignore_patterns("  *.tmp\t\r\n"), vec!["*.tmp"]);
    }

    #[test]
    fn test_parse_keeps_indented_hash_as_comment() {
        // Trimming happens before the comment check.
        assert!(parse_ignore_patterns("   # indented comment").is_empty());
    }

    #[test]
    fn test_parse_takes_gitignore_forms_literally() {
        let patterns = parse_ignore_patterns("/build\n!keep.go\nlogs/\n");
        assert_eq!(patterns, vec!["/build", "!keep.go", "logs/"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_ignore_patterns("").is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let patterns = load_ignore_patterns(Utf8Path::new("/nonexistent/dir/.gitignore"));
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "*.min.js\n# note\nsecret.sql\n").unwrap();

        let path = Utf8PathBuf::from_path_buf(path).unwrap();
        assert_eq!(load_ignore_patterns(&path), vec!["*.min.js", "secret.sql"]);
    }

    #[test]
    fn test_load_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_owned()).unwrap();
        assert!(load_ignore_patterns(&path).is_empty());
    }
}

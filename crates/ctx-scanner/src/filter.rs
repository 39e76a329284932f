//! Path filtering decisions for the directory walk.
//!
//! [`PathFilter`] is a pure decision function consulted by the walker for
//! every directory entry:
//!
//! - Directories are pruned by exact name ([`PathFilter::should_descend`]),
//!   before any pattern is evaluated, so nothing beneath them is visited.
//! - Files must carry an allowed extension and must not match any ignore
//!   glob ([`PathFilter::should_include`]). Globs see the base name only.
//!
//! # Examples
//!
//! ```
//! use ctx_scanner::{PathFilter, ScanConfig};
//! use camino::Utf8Path;
//!
//! let config = ScanConfig::new(Utf8Path::new("."))
//!     .with_extensions([".go"])
//!     .with_patterns(["*_test.go"]);
//! let filter = PathFilter::new(&config);
//!
//! assert!(!filter.should_descend(".git"));
//! assert!(filter.should_descend("cmd"));
//!
//! assert!(filter.should_include(Utf8Path::new("cmd/main.go"), "main.go"));
//! assert!(!filter.should_include(Utf8Path::new("cmd/main_test.go"), "main_test.go"));
//! assert!(!filter.should_include(Utf8Path::new("README.md"), "README.md"));
//! ```

use camino::Utf8Path;
use ctx_core::FxHashSet;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{trace, warn};

use crate::config::ScanConfig;

/// Returns the extension of a file name, including the leading dot.
///
/// The extension runs from the last `.` to the end of the name. Names
/// without a dot have an empty extension; dotfiles are all extension.
///
/// # Examples
///
/// ```
/// use ctx_scanner::extension_of;
///
/// assert_eq!(extension_of("main.go"), ".go");
/// assert_eq!(extension_of("bundle.min.js"), ".js");
/// assert_eq!(extension_of("Makefile"), "");
/// assert_eq!(extension_of(".gitignore"), ".gitignore");
/// ```
#[inline]
#[must_use]
pub fn extension_of(file_name: &str) -> &str {
    file_name.rfind('.').map_or("", |dot| &file_name[dot..])
}

/// Stateless include/descend decisions built from a [`ScanConfig`].
///
/// # Thread Safety
///
/// `PathFilter` is immutable after construction and is shared between the
/// walk and the `ignore` crate's entry filter via `Arc`.
#[derive(Debug, Clone)]
pub struct PathFilter {
    /// Directory names that are never descended into.
    ignored_dir_names: FxHashSet<String>,
    /// Allowed extensions, dot included.
    allowed_extensions: FxHashSet<String>,
    /// Compiled ignore globs.
    patterns: GlobSet,
}

impl PathFilter {
    /// Builds a filter from the configuration.
    ///
    /// Patterns that fail to compile are dropped with a warning; they could
    /// never have matched anything.
    #[must_use]
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            ignored_dir_names: config.ignored_dir_names.clone(),
            allowed_extensions: config.allowed_extensions.clone(),
            patterns: compile_patterns(&config.glob_patterns),
        }
    }

    /// Returns `false` iff `dir_name` is one of the ignored directory names.
    #[inline]
    #[must_use]
    pub fn should_descend(&self, dir_name: &str) -> bool {
        !self.ignored_dir_names.contains(dir_name)
    }

    /// Returns `true` if the file should be read and handed to the sink.
    ///
    /// `file_name` is the base name of `file_path`; patterns are only ever
    /// evaluated against it.
    #[must_use]
    pub fn should_include(&self, file_path: &Utf8Path, file_name: &str) -> bool {
        if !self.allowed_extensions.contains(extension_of(file_name)) {
            return false;
        }

        if self.patterns.is_match(file_name) {
            trace!(path = %file_path, "Excluded by ignore pattern");
            return false;
        }

        true
    }

    /// Returns the number of compiled ignore patterns.
    #[inline]
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Compiles shell-style globs into a single set.
fn compile_patterns(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let escaped = escape_braces(pattern);
        match GlobBuilder::new(&escaped).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => warn!(pattern = %pattern, error = %e, "Skipping invalid ignore pattern"),
        }
    }

    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to build ignore pattern set, ignoring all patterns");
        GlobSet::empty()
    })
}

/// Makes `{` and `}` literal so `{a,b}` is not treated as alternation.
///
/// Braces inside a character class and backslash-escaped braces are already
/// literal and are left alone.
fn escape_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                if let Some(&neg) = chars.peek().filter(|&&n| n == '!' || n == '^') {
                    out.push(neg);
                    chars.next();
                }
                // A leading `]` is a member, not the end of the class.
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' if !in_class => out.push_str("[{]"),
            '}' if !in_class => out.push_str("[}]"),
            _ => out.push(c),
        }
    }

    out
}

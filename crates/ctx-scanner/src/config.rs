//! Scanner configuration.

use camino::{Utf8Path, Utf8PathBuf};
use ctx_core::{string_set, FxHashSet, ScanSettings, DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS};

use crate::ignore_file::load_ignore_patterns;

/// Capacity of the bounded queue between the walk and the reader pool.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Configuration for a single scan.
///
/// Built once before the scan starts and never mutated while it runs.
///
/// # Examples
///
/// ```
/// use ctx_scanner::ScanConfig;
/// use camino::Utf8Path;
///
/// let config = ScanConfig::new(Utf8Path::new("./src"))
///     .with_extensions([".go", ".sql"])
///     .with_ignored_dirs(["vendor"])
///     .with_patterns(["*_test.go"]);
///
/// assert!(config.ignored_dir_names.contains(".git"));
/// assert!(config.ignored_dir_names.contains("vendor"));
/// assert_eq!(config.allowed_extensions.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan.
    pub root: Utf8PathBuf,
    /// Directory names that are never descended into.
    pub ignored_dir_names: FxHashSet<String>,
    /// Glob patterns matched against file base names; any match excludes.
    pub glob_patterns: Vec<String>,
    /// Allowed extensions, each including the leading dot.
    pub allowed_extensions: FxHashSet<String>,
    /// Whether to follow symbolic links.
    pub follow_links: bool,
    /// Capacity of the pending-path queue.
    pub queue_capacity: usize,
}

impl ScanConfig {
    /// Creates a configuration for `root` with the default ignored
    /// directories and extensions, no glob patterns, and the default queue
    /// capacity.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            root: root.to_owned(),
            ignored_dir_names: string_set(DEFAULT_IGNORED_DIRS.iter().copied()),
            glob_patterns: Vec::new(),
            allowed_extensions: string_set(DEFAULT_EXTENSIONS.iter().copied()),
            follow_links: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Builds a configuration from a settings file section, loading the
    /// ignore-file it names.
    #[must_use]
    pub fn from_settings(settings: &ScanSettings) -> Self {
        Self {
            root: settings.root.clone(),
            ignored_dir_names: string_set(settings.ignored_dirs.iter().cloned()),
            glob_patterns: Vec::new(),
            allowed_extensions: string_set(settings.extensions.iter().cloned()),
            follow_links: settings.follow_links,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
        .with_ignore_file(&settings.ignore_file_path())
    }

    /// Adds directory names to prune during the walk.
    #[must_use]
    pub fn with_ignored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_dir_names.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Replaces the allowed extension set.
    ///
    /// Each extension should include its leading dot (`".go"`).
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = string_set(extensions);
        self
    }

    /// Appends glob patterns matched against file base names.
    #[must_use]
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.glob_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Appends the patterns of the ignore-file at `path`.
    ///
    /// A missing or unreadable file adds nothing.
    #[must_use]
    pub fn with_ignore_file(self, path: &Utf8Path) -> Self {
        let patterns = load_ignore_patterns(path);
        self.with_patterns(patterns)
    }

    /// Configures whether to follow symbolic links.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Sets the capacity of the pending-path queue.
    #[must_use]
    pub const fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}

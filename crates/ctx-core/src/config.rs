//! Settings file model for the repo-ctx tool.
//!
//! This module provides the serde model of the optional JSON settings file:
//!
//! - [`ScanSettings`] - Scanner settings (root, ignore-file, extensions, workers)
//! - [`Config`] - Root configuration wrapping all settings
//!
//! Every field is defaulted, so a settings file only needs to name what it
//! overrides.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File extensions scanned when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".svelte", ".ts", ".go", ".html", ".sql"];

/// Directory names that are always pruned from the walk.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", "node_modules"];

/// Ignore-file looked up relative to the scan root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Configuration for a repository scan.
///
/// # Examples
///
/// ```
/// use ctx_core::ScanSettings;
///
/// let settings = ScanSettings::default();
/// assert_eq!(settings.root.as_str(), ".");
/// assert_eq!(settings.ignore_file_path().as_str(), "./.gitignore");
/// assert!(settings.workers.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Directory to scan.
    pub root: Utf8PathBuf,

    /// Ignore-file with glob patterns. Relative paths resolve against `root`.
    pub ignore_file: Utf8PathBuf,

    /// Allowed file extensions, each including the leading dot.
    pub extensions: Vec<String>,

    /// Directory names pruned during the walk.
    pub ignored_dirs: Vec<String>,

    /// Number of reader threads.
    /// `None` means use the host's available parallelism.
    pub workers: Option<usize>,

    /// Whether to follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            ignore_file: Utf8PathBuf::from(DEFAULT_IGNORE_FILE),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect(),
            ignored_dirs: DEFAULT_IGNORED_DIRS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            workers: None,
            follow_links: false,
        }
    }
}

impl ScanSettings {
    /// Returns the ignore-file path, resolved against the scan root when relative.
    #[must_use]
    pub fn ignore_file_path(&self) -> Utf8PathBuf {
        if self.ignore_file.is_absolute() {
            self.ignore_file.clone()
        } else {
            self.root.join(&self.ignore_file)
        }
    }

    /// Checks option values that the scanner would reject later.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `workers` is zero or an
    /// extension does not start with a dot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::invalid_option(
                "workers",
                "must be at least 1",
            ));
        }

        if let Some(ext) = self.extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(ConfigError::invalid_option(
                "extensions",
                format!("'{ext}' must start with '.'"),
            ));
        }

        Ok(())
    }
}

/// Root configuration for the repo-ctx tool.
///
/// # Examples
///
/// ```
/// use ctx_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"scan": {"workers": 4}}"#).unwrap();
/// assert_eq!(config.scan.workers, Some(4));
/// assert_eq!(config.scan.ignored_dirs, vec![".git", "node_modules"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner settings.
    pub scan: ScanSettings,
}

impl Config {
    /// Loads and validates a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, and
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.scan.validate()?;
        Ok(config)
    }
}

//! Error types for the ctx-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! during directory traversal and file reading.

use camino::Utf8PathBuf;

/// Errors that can occur during scanning operations.
///
/// # Error Recovery Strategy
///
/// - **Walk errors** ([`ScanError::Walk`]): Fatal - the walk stops, the
///   reader pool drains, and the error is returned from the scan
/// - **File read errors** ([`ScanError::Read`]): Logged, file skipped, scan
///   continues. Never returned from a scan
///
/// # Examples
///
/// ```
/// use ctx_scanner::ScanError;
///
/// fn handle_error(err: ScanError) {
///     match err {
///         ScanError::Walk(e) => eprintln!("Walk error: {e}"),
///         ScanError::Read { path, .. } => eprintln!("Read error: {path}"),
///         ScanError::Config(msg) => eprintln!("Config error: {msg}"),
///         ScanError::WorkerPanicked { worker } => eprintln!("worker {worker} panicked"),
///         ScanError::Spawn(e) => eprintln!("Spawn error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to enumerate a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read a file.
    ///
    /// Scanning continues by skipping this file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid scan configuration, detected before any thread is spawned.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A reader thread panicked, usually inside the sink.
    #[error("reader worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the worker that panicked.
        worker: usize,
    },

    /// A reader thread could not be spawned.
    #[error("failed to spawn reader worker: {0}")]
    Spawn(#[source] std::io::Error),
}

impl ScanError {
    /// Creates a new [`ScanError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if this error is recoverable (scanning can continue).
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// Returns `true` if this error is fatal (scanning should stop).
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. } => Some(path),
            Self::Walk(_) | Self::Config(_) | Self::WorkerPanicked { .. } | Self::Spawn(_) => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_scan_error_read() {
        let err = ScanError::read(
            "src/foo.go",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
        assert_eq!(err.path().map(|p| p.as_str()), Some("src/foo.go"));
        assert!(err.to_string().contains("src/foo.go"));
    }

    #[test]
    fn test_scan_error_config() {
        let err = ScanError::config("worker count must be at least 1");
        assert!(!err.is_recoverable());
        assert!(err.is_fatal());
        assert!(err.path().is_none());
        assert_eq!(
            err.to_string(),
            "invalid configuration: worker count must be at least 1"
        );
    }

    #[test]
    fn test_scan_error_worker_panicked() {
        let err = ScanError::WorkerPanicked { worker: 3 };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "reader worker 3 panicked");
    }

    #[test]
    fn test_scan_error_walk_from_ignore() {
        let walk_err = ignore::Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = ScanError::from(walk_err);
        assert!(matches!(err, ScanError::Walk(_)));
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("failed to walk directory"));
    }
}

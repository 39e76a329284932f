//! Scan statistics with atomic counters.
//!
//! This module provides [`ScanStats`] for counting what a scan did and
//! [`StatsSnapshot`] for point-in-time views.
//!
//! # Thread Safety
//!
//! All counters use [`AtomicU64`] with [`Relaxed`](std::sync::atomic::Ordering::Relaxed)
//! ordering. Reader threads bump them concurrently; the snapshot returned by
//! a scan is taken after every reader has been joined, so it is exact.
//!
//! # Examples
//!
//! ```
//! use ctx_scanner::ScanStats;
//!
//! let stats = ScanStats::new();
//! stats.increment_dispatched();
//! stats.record_delivered(128);
//!
//! let snapshot = stats.snapshot();
//! assert_eq!(snapshot.files_delivered, 1);
//! assert_eq!(snapshot.bytes_read, 128);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for a scan.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Directories skipped because their name is ignored.
    dirs_pruned: AtomicU64,
    /// Files rejected by extension, pattern, or non-UTF-8 path.
    files_filtered: AtomicU64,
    /// Files pushed onto the reader queue.
    files_dispatched: AtomicU64,
    /// Files read and handed to the sink.
    files_delivered: AtomicU64,
    /// Files that could not be read.
    read_errors: AtomicU64,
    /// Total bytes handed to the sink.
    bytes_read: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the pruned directories counter.
    #[inline]
    pub fn increment_pruned(&self) {
        self.dirs_pruned.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the filtered files counter.
    #[inline]
    pub fn increment_filtered(&self) {
        self.files_filtered.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the dispatched files counter.
    #[inline]
    pub fn increment_dispatched(&self) {
        self.files_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one delivered file of `bytes` length.
    #[inline]
    pub fn record_delivered(&self, bytes: u64) {
        self.files_delivered.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Increments the read error counter.
    #[inline]
    pub fn increment_read_errors(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dirs_pruned: self.dirs_pruned.load(Ordering::Relaxed),
            files_filtered: self.files_filtered.load(Ordering::Relaxed),
            files_dispatched: self.files_dispatched.load(Ordering::Relaxed),
            files_delivered: self.files_delivered.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.dirs_pruned.store(0, Ordering::Relaxed);
        self.files_filtered.store(0, Ordering::Relaxed);
        self.files_dispatched.store(0, Ordering::Relaxed);
        self.files_delivered.store(0, Ordering::Relaxed);
        self.read_errors.store(0, Ordering::Relaxed);
        self.bytes_read.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of scan statistics.
///
/// # Examples
///
/// ```
/// use ctx_scanner::StatsSnapshot;
///
/// let snap = StatsSnapshot {
///     files_dispatched: 10,
///     files_delivered: 9,
///     read_errors: 1,
///     ..Default::default()
/// };
/// assert!(snap.is_drained());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Directories skipped because their name is ignored.
    pub dirs_pruned: u64,
    /// Files rejected by extension, pattern, or non-UTF-8 path.
    pub files_filtered: u64,
    /// Files pushed onto the reader queue.
    pub files_dispatched: u64,
    /// Files read and handed to the sink.
    pub files_delivered: u64,
    /// Files that could not be read.
    pub read_errors: u64,
    /// Total bytes handed to the sink.
    pub bytes_read: u64,
}

impl StatsSnapshot {
    /// Returns `true` if every dispatched file was either delivered or
    /// dropped after a read error.
    #[inline]
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.files_dispatched == self.files_delivered + self.read_errors
    }

    /// Returns the number of files the walk looked at.
    #[inline]
    #[must_use]
    pub const fn files_seen(&self) -> u64 {
        self.files_dispatched + self.files_filtered
    }
}

//! Concurrent directory walk with a bounded reader pool.
//!
//! This module provides [`ConcurrentWalker`], which walks a directory tree on
//! the calling thread and hands accepted file paths to a fixed pool of reader
//! threads over a bounded channel.
//!
//! # Design
//!
//! ```text
//! calling thread                     reader pool (worker_count threads)
//! ┌─────────────────────┐            ┌──────────────────────────────┐
//! │ WalkBuilder (ignore)│            │ scan-worker-0: read → sink   │
//! │  filter_entry: prune│  bounded   │ scan-worker-1: read → sink   │
//! │  should_include     │ ─────────► │ ...                          │
//! │  tx.send(path)      │ (capacity) │ scan-worker-N: read → sink   │
//! └─────────────────────┘            └──────────────────────────────┘
//!            │ walk ends (ok or error): drop(tx)
//!            ▼
//!      join every worker, then return
//! ```
//!
//! The queue is the only synchronization between the walk and the readers.
//! When it is full the walk blocks, so memory stays bounded regardless of
//! tree size. Workers run as scoped threads, which lets the sink be borrowed
//! instead of requiring `'static`.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use ctx_core::FileRecord;
//! use ctx_scanner::{default_worker_count, ConcurrentWalker, ScanConfig};
//! use camino::Utf8Path;
//!
//! let walker = ConcurrentWalker::new(ScanConfig::new(Utf8Path::new("./src")));
//! let bytes = AtomicU64::new(0);
//!
//! let stats = walker.scan(default_worker_count(), &|record: FileRecord| {
//!     bytes.fetch_add(record.len() as u64, Ordering::Relaxed);
//! })?;
//! println!("{} files, {} bytes", stats.files_delivered, bytes.load(Ordering::Relaxed));
//! # Ok::<(), ctx_scanner::ScanError>(())
//! ```

use std::fs;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use crossbeam_channel::{Receiver, Sender};
use ctx_core::FileRecord;
use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::filter::PathFilter;
use crate::sink::FileSink;
use crate::stats::{ScanStats, StatsSnapshot};

/// Returns the host's available parallelism, or 1 if it cannot be determined.
#[must_use]
pub fn default_worker_count() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Walks a directory tree and reads accepted files on a pool of threads.
///
/// # Guarantees
///
/// - Directories named in `ignored_dir_names` are pruned; nothing beneath
///   them is visited.
/// - Each dispatched path produces at most one sink call.
/// - [`scan`](Self::scan) returns only after every reader thread has exited,
///   so no read is in flight and no sink call happens afterwards.
///
/// A walker can run any number of scans, one at a time.
#[derive(Debug)]
pub struct ConcurrentWalker {
    /// Scan configuration.
    config: ScanConfig,
    /// Filter shared with the entry filter closure.
    filter: Arc<PathFilter>,
    /// Counters for the most recent scan.
    stats: Arc<ScanStats>,
}

impl ConcurrentWalker {
    /// Creates a walker for the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        let filter = PathFilter::new(&config);
        Self {
            config,
            filter: Arc::new(filter),
            stats: Arc::new(ScanStats::new()),
        }
    }

    /// Runs one scan, delivering every accepted and readable file to `sink`.
    ///
    /// `sink` may be called concurrently from up to `worker_count` threads
    /// and in any order.
    ///
    /// Unreadable files are skipped and counted; they never fail the scan.
    ///
    /// # Returns
    ///
    /// A [`StatsSnapshot`] for the completed scan.
    ///
    /// # Errors
    ///
    /// - [`ScanError::Config`] if `worker_count` or the queue capacity is
    ///   zero, or the root is missing or not a directory. Nothing is spawned.
    /// - [`ScanError::Walk`] for the first directory enumeration failure.
    ///   The walk stops there, but files already dispatched are still read
    ///   and delivered before the error is returned.
    /// - [`ScanError::WorkerPanicked`] if a reader thread panicked.
    /// - [`ScanError::Spawn`] if a reader thread could not be started.
    pub fn scan<S>(&self, worker_count: usize, sink: &S) -> Result<StatsSnapshot, ScanError>
    where
        S: FileSink + ?Sized,
    {
        if worker_count == 0 {
            return Err(ScanError::config("worker count must be at least 1"));
        }
        if self.config.queue_capacity == 0 {
            return Err(ScanError::config("queue capacity must be at least 1"));
        }
        self.validate_root()?;

        info!(
            root = %self.config.root,
            workers = worker_count,
            patterns = self.filter.pattern_count(),
            "Starting scan"
        );

        let start = Instant::now();
        self.stats.reset();

        let (tx, rx) = crossbeam_channel::bounded::<Utf8PathBuf>(self.config.queue_capacity);
        let stats: &ScanStats = &self.stats;

        let (walk_result, pool_result) = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(worker_count);
            let mut spawn_error = None;

            for worker in 0..worker_count {
                let worker_rx = rx.clone();
                let spawned = thread::Builder::new()
                    .name(format!("scan-worker-{worker}"))
                    .spawn_scoped(scope, move || read_loop(&worker_rx, sink, stats));

                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => {
                        spawn_error = Some(ScanError::Spawn(e));
                        break;
                    }
                }
            }

            // Only workers hold receivers now; if they all exit, sends fail.
            drop(rx);

            let walk_result = match spawn_error {
                Some(err) => Err(err),
                None => self.feed(&tx),
            };

            // Close the queue: workers drain what is left, then exit.
            drop(tx);

            (walk_result, join_workers(handles))
        });

        walk_result?;
        pool_result?;

        let snapshot = self.stats.snapshot();
        info!(
            delivered = snapshot.files_delivered,
            read_errors = snapshot.read_errors,
            filtered = snapshot.files_filtered,
            pruned = snapshot.dirs_pruned,
            bytes = snapshot.bytes_read,
            elapsed_ms = start.elapsed().as_millis(),
            "Scan completed"
        );

        Ok(snapshot)
    }

    /// Returns counters for the most recent scan.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns the scan configuration.
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Returns the path filter built from the configuration.
    #[must_use]
    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    fn validate_root(&self) -> Result<(), ScanError> {
        let root = &self.config.root;
        if !root.exists() {
            return Err(ScanError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "root path is not a directory: {root}"
            )));
        }
        Ok(())
    }

    /// Walks the tree and pushes accepted paths onto the queue.
    ///
    /// Stops at the first walk error. Blocks whenever the queue is full.
    fn feed(&self, tx: &Sender<Utf8PathBuf>) -> Result<(), ScanError> {
        for result in self.build_walker() {
            let entry = result?;

            // Directories were already decided by the entry filter. Unfollowed
            // symlinks are dispatched as files; the read resolves them.
            if !entry
                .file_type()
                .is_some_and(|ft| ft.is_file() || ft.is_symlink())
            {
                continue;
            }

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                warn!(path = %entry.path().display(), "Skipping non-UTF-8 path");
                self.stats.increment_filtered();
                continue;
            };

            let file_name = path.file_name().unwrap_or_default();
            if !self.filter.should_include(path, file_name) {
                self.stats.increment_filtered();
                continue;
            }

            if tx.send(path.to_owned()).is_err() {
                warn!("All reader workers exited early, stopping walk");
                break;
            }
            self.stats.increment_dispatched();
        }

        Ok(())
    }

    /// Builds the single-threaded `ignore` walker.
    fn build_walker(&self) -> ignore::Walk {
        let filter = Arc::clone(&self.filter);
        let stats = Arc::clone(&self.stats);

        WalkBuilder::new(&self.config.root)
            // Only our own rules apply: no .gitignore, no hidden-file skipping
            .standard_filters(false)
            .follow_links(self.config.follow_links)
            .threads(1)
            // Deterministic order for debugging; callers must not rely on it
            .sort_by_file_name(|a, b| a.cmp(b))
            // Prune ignored directories before descending (root is never filtered)
            .filter_entry(move |entry| {
                if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }

                let descend = entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| filter.should_descend(name));

                if !descend {
                    debug!(path = %entry.path().display(), "Pruned ignored directory");
                    stats.increment_pruned();
                }
                descend
            })
            .build()
    }
}

/// Reads queued paths until the queue is closed and drained.
fn read_loop<S>(rx: &Receiver<Utf8PathBuf>, sink: &S, stats: &ScanStats)
where
    S: FileSink + ?Sized,
{
    for path in rx {
        match fs::read(&path) {
            Ok(content) => {
                stats.record_delivered(u64::try_from(content.len()).unwrap_or(u64::MAX));
                sink.accept(FileRecord::new(path, content));
            }
            Err(source) => {
                stats.increment_read_errors();
                let err = ScanError::read(path, source);
                debug!(error = %err, "Skipping unreadable file");
            }
        }
    }
}

/// Joins every worker, reporting the first one that panicked.
fn join_workers(handles: Vec<(usize, ScopedJoinHandle<'_, ()>)>) -> Result<(), ScanError> {
    let mut first_panic = None;

    for (worker, handle) in handles {
        if handle.join().is_err() {
            warn!(worker, "Reader worker panicked");
            first_panic.get_or_insert(ScanError::WorkerPanicked { worker });
        }
    }

    first_panic.map_or(Ok(()), Err)
}

//! Concurrent directory scanner that feeds source files to a sink.
//!
//! This crate walks a repository, decides which files belong in an
//! assembled context, and reads the accepted files on a fixed pool of
//! threads, handing each `(path, content)` pair to a caller-supplied sink.
//!
//! # Overview
//!
//! The main entry point is [`ConcurrentWalker`], which combines:
//!
//! - [`PathFilter`]: Directory pruning by name, extension allow-list, and
//!   base-name glob exclusion
//! - [`ScanConfig`]: Builder-style scan configuration, optionally seeded
//!   from an ignore-file
//! - [`FileSink`]: Concurrent-safe receiver of [`FileRecord`]s
//! - [`ScanStats`]: Atomic statistics for progress tracking
//!
//! # Example
//!
//! ```no_run
//! use ctx_core::FileRecord;
//! use ctx_scanner::{ConcurrentWalker, ScanConfig};
//! use camino::Utf8Path;
//! use parking_lot::Mutex;
//!
//! let config = ScanConfig::new(Utf8Path::new("."))
//!     .with_ignore_file(Utf8Path::new("./.gitignore"));
//! let walker = ConcurrentWalker::new(config);
//!
//! let paths = Mutex::new(Vec::new());
//! let stats = walker.scan(4, &|record: FileRecord| paths.lock().push(record.path))?;
//! println!("Loaded {} files", stats.files_delivered);
//! # Ok::<(), ctx_scanner::ScanError>(())
//! ```
//!
//! # Streaming API
//!
//! Async consumers can receive records as they are read through
//! [`ChannelSink`], running the scan itself on a blocking thread:
//!
//! ```ignore
//! let (tx, mut rx) = tokio::sync::mpsc::channel(256);
//! let walker = ConcurrentWalker::new(ScanConfig::new(Utf8Path::new("./src")));
//!
//! let scan = tokio::task::spawn_blocking(move || walker.scan(4, &ChannelSink::new(tx)));
//!
//! while let Some(record) = rx.recv().await {
//!     println!("{}: {} bytes", record.path, record.len());
//! }
//! let stats = scan.await??;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ConcurrentWalker (main entry point)
//!     │
//!     ├── WalkBuilder (ignore crate, single-threaded, filter_entry pruning)
//!     │       │
//!     │       └── PathFilter (globset + FxHashSet)
//!     │
//!     ├── bounded queue (crossbeam-channel)
//!     │
//!     ├── reader pool (scoped threads: fs::read → FileSink)
//!     │
//!     └── ScanStats (atomic counters)
//! ```
//!
//! # Performance
//!
//! - **Memory**: O(queue capacity + worker count) file contents in flight
//! - **CPU**: Reads overlap across `worker_count` threads; the walk itself
//!   is sequential
//! - **Locking**: None in the scanner; the queue is the only shared structure
//!
//! [`FileRecord`]: ctx_core::FileRecord

#![deny(clippy::all)]
#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod ignore_file;
mod sink;
mod stats;
mod walker;

pub use config::{ScanConfig, DEFAULT_QUEUE_CAPACITY};
pub use error::ScanError;
pub use filter::{extension_of, PathFilter};
pub use ignore_file::{load_ignore_patterns, parse_ignore_patterns};
pub use sink::{ChannelSink, FileSink};
pub use stats::{ScanStats, StatsSnapshot};
pub use walker::{default_worker_count, ConcurrentWalker};

/// Runs a single scan with a fresh [`ConcurrentWalker`].
///
/// Shorthand for `ConcurrentWalker::new(config).scan(worker_count, sink)`.
///
/// # Errors
///
/// See [`ConcurrentWalker::scan`].
pub fn scan<S>(config: ScanConfig, worker_count: usize, sink: &S) -> Result<StatsSnapshot, ScanError>
where
    S: FileSink + ?Sized,
{
    ConcurrentWalker::new(config).scan(worker_count, sink)
}

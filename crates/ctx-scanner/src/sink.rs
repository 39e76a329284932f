//! Receivers for file records produced by a scan.
//!
//! A [`FileSink`] is called once per accepted, successfully read file, from
//! whichever reader thread read it. The scanner imposes no ordering and no
//! serialization: up to `worker_count` calls may run at the same time. Any
//! shared state behind a sink is the sink's own to synchronize.
//!
//! # Examples
//!
//! Any `Fn(FileRecord) + Send + Sync` closure is a sink:
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use ctx_core::FileRecord;
//! use ctx_scanner::FileSink;
//!
//! let count = AtomicUsize::new(0);
//! let sink = |_record: FileRecord| {
//!     count.fetch_add(1, Ordering::Relaxed);
//! };
//!
//! sink.accept(FileRecord::new("a.go", Vec::new()));
//! assert_eq!(count.load(Ordering::Relaxed), 1);
//! ```

use ctx_core::FileRecord;
use tokio::sync::mpsc;
use tracing::trace;

/// A concurrent-safe receiver of file records.
///
/// # Thread Safety
///
/// Sinks must be [`Send`] and [`Sync`] because they are shared by reference
/// across all reader threads of a scan.
pub trait FileSink: Send + Sync {
    /// Takes ownership of one file record.
    fn accept(&self, record: FileRecord);
}

impl<F> FileSink for F
where
    F: Fn(FileRecord) + Send + Sync,
{
    #[inline]
    fn accept(&self, record: FileRecord) {
        self(record);
    }
}

/// A sink that forwards records into a tokio channel.
///
/// Lets an async consumer receive records while the scan itself runs on a
/// blocking thread (for example via `tokio::task::spawn_blocking`).
/// `blocking_send` applies the channel's backpressure to the reader threads.
///
/// If the receiver has been dropped, records are discarded and the scan
/// still runs to completion.
///
/// # Examples
///
/// ```no_run
/// use ctx_scanner::{ChannelSink, ConcurrentWalker, ScanConfig};
/// use camino::Utf8Path;
/// use tokio::sync::mpsc;
///
/// # async fn run() {
/// let (tx, mut rx) = mpsc::channel(256);
/// let walker = ConcurrentWalker::new(ScanConfig::new(Utf8Path::new("./src")));
///
/// let scan = tokio::task::spawn_blocking(move || walker.scan(4, &ChannelSink::new(tx)));
///
/// while let Some(record) = rx.recv().await {
///     println!("{}: {} bytes", record.path, record.len());
/// }
/// let _stats = scan.await;
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<FileRecord>,
}

impl ChannelSink {
    /// Wraps a channel sender.
    #[must_use]
    pub const fn new(tx: mpsc::Sender<FileRecord>) -> Self {
        Self { tx }
    }
}

impl FileSink for ChannelSink {
    fn accept(&self, record: FileRecord) {
        if let Err(mpsc::error::SendError(record)) = self.tx.blocking_send(record) {
            trace!(path = %record.path, "Receiver dropped, discarding record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |record: FileRecord| seen.lock().push(record.path);

        sink.accept(FileRecord::new("a.go", Vec::new()));
        sink.accept(FileRecord::new("b.go", Vec::new()));

        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_boxed_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner = Arc::clone(&seen);
        let sink: Box<dyn Fn(FileRecord) + Send + Sync> =
            Box::new(move |record: FileRecord| inner.lock().push(record.content));

        sink.accept(FileRecord::new("a.go", b"x".to_vec()));
        assert_eq!(seen.lock().as_slice(), &[b"x".to_vec()]);
    }

    #[test]
    fn test_borrowed_sink() {
        fn deliver<S: FileSink>(sink: &S) {
            sink.accept(FileRecord::new("a.go", Vec::new()));
        }

        let seen = Mutex::new(0usize);
        let sink = |_record: FileRecord| *seen.lock() += 1;
        deliver(&&sink);
        assert_eq!(*seen.lock(), 1);
    }

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, mut rx) = mpsc::channel(4);
        let sink = ChannelSink::new(tx);

        sink.accept(FileRecord::new("a.go", b"package a".to_vec()));
        drop(sink);

        let record = rx.blocking_recv().unwrap();
        assert_eq!(record.path.as_str(), "a.go");
        assert!(rx.blocking_recv().is_none());
    }

    #[test]
    fn test_channel_sink_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sink = ChannelSink::new(tx);

        // Must not block or panic.
        sink.accept(FileRecord::new("a.go", Vec::new()));
    }
}

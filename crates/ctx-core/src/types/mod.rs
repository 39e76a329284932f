//! Domain types for the repo-ctx tool.
//!
//! - [`record`] - A file read by the scanner, handed to a sink
//!
//! All public types are re-exported at the crate root:
//!
//! ```
//! use ctx_core::FileRecord;
//! ```

mod record;

pub use record::FileRecord;

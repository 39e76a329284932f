//! Core types, settings, and errors for the repo-ctx tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`FileRecord`], the unit of data handed from the scanner to a sink
//! - [`Config`] and [`ScanSettings`], the JSON settings file model
//! - [`ConfigError`] for settings loading and validation
//! - `FxHashSet` aliases used for name and extension lookups

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{
    Config, ScanSettings, DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS, DEFAULT_IGNORE_FILE,
};
pub use error::ConfigError;
pub use hash::{string_set, FxHashSet};
pub use types::FileRecord;

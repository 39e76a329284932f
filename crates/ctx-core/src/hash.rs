//! Fast hash set aliases.
//!
//! Directory names and file extensions are looked up once per directory
//! entry during a scan, so the sets use the Fx hash from `rustc-hash`
//! rather than SipHash. The keys come from local configuration, not from
//! untrusted input, so denial-of-service resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use ctx_core::{string_set, FxHashSet};
//!
//! let dirs: FxHashSet<String> = string_set([".git", "node_modules"]);
//! assert!(dirs.contains(".git"));
//! ```

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Collects string-like items into an owned [`FxHashSet<String>`].
///
/// Duplicates collapse.
///
/// # Examples
///
/// ```
/// use ctx_core::string_set;
///
/// let exts = string_set([".go", ".ts", ".go"]);
/// assert_eq!(exts.len(), 2);
/// ```
#[must_use]
pub fn string_set<I, S>(items: I) -> FxHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_set_from_str_slice() {
        let set = string_set([".git", "node_modules"]);
        assert!(set.contains(".git"));
        assert!(set.contains("node_modules"));
        assert!(!set.contains("target"));
    }

    #[test]
    fn test_string_set_from_owned() {
        let set = string_set(vec![".ts".to_owned(), ".ts".to_owned()]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_string_set_empty() {
        let set = string_set(Vec::<String>::new());
        assert!(set.is_empty());
    }
}

//! Error types for the ctx-core crate.
//!
//! This module provides the [`ConfigError`] type for failures while loading
//! or validating the settings file.

/// Errors that can occur during settings loading and validation.
///
/// # Examples
///
/// ```
/// use ctx_core::ConfigError;
///
/// let error = ConfigError::invalid_option("workers", "must be at least 1");
/// assert!(error.to_string().contains("workers"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A settings option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The settings file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`Config`](crate::Config).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("workers", "must be positive");
        let msg = error.to_string();
        assert!(msg.contains("workers"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = ConfigError::from(io);
        assert!(matches!(error, ConfigError::Io(_)));
        assert!(error.to_string().starts_with("failed to read configuration"));
    }

    #[test]
    fn test_parse_error_from() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ConfigError::from(parse);
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}

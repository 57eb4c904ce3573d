//! Error types for Letterbox operations.
//!
//! Extraction itself never fails: malformed or empty HTML degrades to an
//! empty article list. [`LetterboxError`] covers the edges around it, such as
//! loading configuration, reading input, and serializing output.
//!
//! # Example
//!
//! ```rust
//! use letterbox_core::{LetterboxError, Result};
//!
//! fn load(path: &str) -> Result<String> {
//!     if path.is_empty() {
//!         return Err(LetterboxError::ConfigError("empty path".to_string()));
//!     }
//!     // ... read the file
//!     # Ok(String::new())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Letterbox operations.
#[derive(Error, Debug)]
pub enum LetterboxError {
    /// HTML query errors.
    ///
    /// Returned when a CSS selector cannot be parsed.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Configuration errors.
    ///
    /// Returned when a configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors from reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for LetterboxError.
pub type Result<T> = std::result::Result<T, LetterboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LetterboxError::ConfigError("min_word_count must be a number".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("min_word_count"));
    }

    #[test]
    fn test_file_not_found_error() {
        let err = LetterboxError::FileNotFound(PathBuf::from("/tmp/missing.html"));
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn test_serialization_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: LetterboxError = json_err.into();
        assert!(matches!(err, LetterboxError::Serialization(_)));
    }
}
